//! [`Display`](std::fmt::Display) for geometries, as WKT.

mod scalar;
