pub mod auctionmodel;
pub mod chatmodels;
pub mod contractmodel;
pub mod contractormodel;
pub mod reviewmodel;
pub mod usermodel;
