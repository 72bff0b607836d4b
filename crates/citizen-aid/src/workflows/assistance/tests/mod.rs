mod common;
mod eligibility;
mod routing;
mod strategy;
