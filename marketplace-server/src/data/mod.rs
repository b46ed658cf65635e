pub(crate) mod ad_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;
