// Domain model for URI templates

pub mod template;
