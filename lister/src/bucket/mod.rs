mod lister;

pub use lister::{list_objects, BucketLister};
