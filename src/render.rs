pub(crate) mod compose;
pub(crate) mod composite;
pub(crate) mod template;
pub(crate) mod text;
