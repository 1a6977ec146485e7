pub const VEHICLE_SPEED: &str = "Vehicle.Speed";

pub const SINGLE_LEVEL_WILDCARD: char = '+';
pub const MULTI_LEVEL_WILDCARD: char = '#';
pub const TOPIC_LEVEL_SEPARATOR: char = '/';
