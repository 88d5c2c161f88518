mod router;

pub use router::{Router, RoutingDecision, route};
