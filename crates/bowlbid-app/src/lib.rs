// Library root: the session state and command protocol that sit between a
// front end and the filter/bid engine in `bowlbid-core`.

pub mod app;
pub mod protocol;
