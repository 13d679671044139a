//! Auth Handlers

pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod register;
pub(crate) mod update_me;
