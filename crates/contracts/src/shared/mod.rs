pub mod list_resource;
