pub mod auth;
pub mod killswitch;
pub mod overrides;
pub mod parse;
pub mod run;
pub mod serve;
