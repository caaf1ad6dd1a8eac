/// Construct a context [`Value`][crate::Value] using a JSON-like syntax.
///
/// The top level is always a map. Keys are identifiers, values are nested maps
/// `{ ... }`, lists `[ ... ]`, `None`, or any expression that converts into a
/// `Value` using `From`.
///
/// ```
/// let ctx = descargo::value! {
///     NRO_ACTA: "A-123",
///     PATENTE_LEGIBLE: false,
///     cliente: { NOMBRE: "juan layan", DNI: 30111222 },
///     infracciones: ["semaforo", "velocidad"],
///     EQUIPO_SERIE: None,
/// };
/// assert_eq!(ctx.lookup("cliente.DNI"), Some(&descargo::Value::Integer(30111222)));
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)*) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Map::new();
        $crate::_value!(@map map $($tt)*);
        $crate::Value::Map(map)
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value {
    //////////////////////////////////////////////////////////////////////////
    // TT muncher for the inside of a map. Each entry is inserted into the
    // given map variable.
    //////////////////////////////////////////////////////////////////////////

    (@map $map:ident) => {};

    (@map $map:ident $key:ident : None $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::Value::None);
        $( $crate::_value!(@map $map $($rest)*); )?
    };

    (@map $map:ident $key:ident : { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::value!($($inner)*));
        $( $crate::_value!(@map $map $($rest)*); )?
    };

    (@map $map:ident $key:ident : [ $($inner:tt)* ] $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::_value!(@list $($inner)*));
        $( $crate::_value!(@map $map $($rest)*); )?
    };

    (@map $map:ident $key:ident : $value:expr $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::Value::from($value));
        $( $crate::_value!(@map $map $($rest)*); )?
    };

    //////////////////////////////////////////////////////////////////////////
    // TT muncher for the inside of a list. Elements are pushed onto the given
    // list variable.
    //////////////////////////////////////////////////////////////////////////

    (@list $($tt:tt)*) => {{
        #[allow(unused_mut)]
        let mut list = $crate::List::new();
        $crate::_value!(@push list $($tt)*);
        $crate::Value::List(list)
    }};

    (@push $list:ident) => {};

    (@push $list:ident None $(, $($rest:tt)*)?) => {
        $list.push($crate::Value::None);
        $( $crate::_value!(@push $list $($rest)*); )?
    };

    (@push $list:ident { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $list.push($crate::value!($($inner)*));
        $( $crate::_value!(@push $list $($rest)*); )?
    };

    (@push $list:ident [ $($inner:tt)* ] $(, $($rest:tt)*)?) => {
        $list.push($crate::_value!(@list $($inner)*));
        $( $crate::_value!(@push $list $($rest)*); )?
    };

    (@push $list:ident $value:expr $(, $($rest:tt)*)?) => {
        $list.push($crate::Value::from($value));
        $( $crate::_value!(@push $list $($rest)*); )?
    };
}
