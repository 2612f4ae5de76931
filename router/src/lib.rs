pub mod algo;
pub mod grid;
pub mod net_router;
pub mod ordering;
pub mod report;

use mazer_common::db::core::{RouteError, RoutedDesign, RoutingDB};
use mazer_common::util::config::RoutingConfig;

pub fn route(db: &RoutingDB, config: &RoutingConfig) -> Result<RoutedDesign, RouteError> {
    net_router::run(db, config)
}
