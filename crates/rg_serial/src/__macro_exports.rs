//! Items used by the code `#[derive(Serializable)]` expands to. Not public API.

pub use alloc::string::ToString;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::info::Typed;
    use crate::registry::TypeRegistry;

    pub use inventory;

    /// A registration function submitted to `inventory`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: Typed> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered through `inventory` like any user type; its presence after
    /// collection tells whether collection works on this platform.
    #[derive(crate::Serializable, Default)]
    #[serializable(auto_register)]
    pub struct __AvailFlag;

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
