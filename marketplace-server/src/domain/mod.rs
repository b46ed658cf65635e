pub(crate) mod ad;
pub(crate) mod error;
pub(crate) mod user;
