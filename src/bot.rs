pub(crate) mod gateway;
pub(crate) mod handler;
pub(crate) mod messenger;
