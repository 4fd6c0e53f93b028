pub mod rating_request;
