// Domain layer: amounts, locale/currency data and the config port. No formatting logic here.

pub mod model;
pub mod ports;
