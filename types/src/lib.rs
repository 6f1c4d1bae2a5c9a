pub mod phase0 {
    pub mod containers;
    pub mod primitives;

    mod container_impls;
}
