mod parts;
mod physics;
mod vehicle;

pub use parts::{classify_lifting_surfaces, lifting_area, PartDescriptor, PartInfo};
pub use physics::{Force, ForceCategory, ForceMode, Moment, ReferenceFrame, RigidBodyComponent};
pub use vehicle::{ActiveVehicle, FlightSituation, VehicleParts, VehicleState};
