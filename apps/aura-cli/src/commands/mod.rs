pub mod automation;
pub mod chat;
pub mod dashboard;
pub mod finance;
pub mod goal;
pub mod integration;
pub mod relationships;
pub mod session;
pub mod wellness;
