pub(crate) mod ads;
pub(crate) mod auth;
