/// Register each function object with `$reg`, returning early on the first
/// duplicate or invalid name.
#[macro_export]
macro_rules! register_functions {
    ( $reg:expr ; $($f:expr),+ $(,)? ) => {{
        $(
            $reg.register($crate::function::UdqFunction::from($f))?;
        )+
    }};
}
