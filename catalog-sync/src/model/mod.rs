pub mod catalog;
pub mod ledger;
pub mod routing;
