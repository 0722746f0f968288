pub mod auctiondtos;
pub mod chatdtos;
pub mod contractdtos;
pub mod contractordtos;
pub mod reviewdtos;
pub mod userdtos;
