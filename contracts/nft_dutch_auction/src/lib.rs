#![no_std]

mod contract;
mod errors;
mod pricing;
mod storage;
mod types;


pub use contract::{DutchAuctionContract, DutchAuctionContractClient};
pub use errors::Error;
pub use types::{PricePhase, SaleConfig, SaleStatus};
