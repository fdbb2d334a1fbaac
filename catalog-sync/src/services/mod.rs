pub mod change;
pub mod flatten;
pub mod hash;
pub mod languages;
pub mod merge;
pub mod pipeline;
pub mod routing;
pub mod store;
pub mod translator;
