pub mod prim;
