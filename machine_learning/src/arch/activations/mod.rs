mod act_fn;

pub use act_fn::{ActFn, CATALOG};
