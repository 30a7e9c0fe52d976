/// Builds a [`Value`][crate::Value] from a JSON-like literal.
///
/// Keys must evaluate to strings; values may be literals, nested
/// structures, or any expression whose type implements
/// [`IntoJson`][crate::IntoJson]. Repeated keys are kept in order, the
/// same as the decoding entry points.
///
/// ```rust
/// use jsonval::jsonval;
///
/// let age = 43;
/// let customer = jsonval!({
///     "name": "Bob",
///     "age": age,
///     "tags": ["new", null],
/// });
/// assert_eq!(customer.get("age").and_then(|v| v.as_i64()), Ok(43));
/// ```
#[macro_export]
macro_rules! jsonval {
    ($($json:tt)+) => {
        $crate::jsonval_internal!($($json)+)
    };
}

// TT muncher adapted to ordered duplicate-preserving objects: entries
// are pushed onto a vector instead of inserted into a map.
#[macro_export]
#[doc(hidden)]
macro_rules! jsonval_internal {
    //////////////////////////////////////////////////////////////////////////
    // TT muncher for parsing the inside of an array [...]. Produces a
    // vec![...] of the elements.
    //
    // Must be invoked as: jsonval_internal!(@array [] $($tt)*)
    //////////////////////////////////////////////////////////////////////////

    // Done with trailing comma.
    (@array [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };

    // Done without trailing comma.
    (@array [$($elems:expr),*]) => {
        ::std::vec![$($elems),*]
    };

    // Next element is `null`.
    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!(null)] $($rest)*)
    };

    // Next element is `true`.
    (@array [$($elems:expr,)*] true $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!(true)] $($rest)*)
    };

    // Next element is `false`.
    (@array [$($elems:expr,)*] false $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!(false)] $($rest)*)
    };

    // Next element is an array.
    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!([$($array)*])] $($rest)*)
    };

    // Next element is an object.
    (@array [$($elems:expr,)*] {$($object:tt)*} $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!({$($object)*})] $($rest)*)
    };

    // Next element is an expression followed by comma.
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!($next),] $($rest)*)
    };

    // Last element is an expression with no trailing comma.
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::jsonval_internal!(@array [$($elems,)* $crate::jsonval_internal!($last)])
    };

    // Comma after the most recent element.
    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::jsonval_internal!(@array [$($elems,)*] $($rest)*)
    };

    // Unexpected token after most recent element.
    (@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        $crate::jsonval_unexpected!($unexpected)
    };

    //////////////////////////////////////////////////////////////////////////
    // TT muncher for parsing the inside of an object {...}. Each entry is
    // pushed onto the given vector variable, so repeated keys survive.
    //
    // Must be invoked as: jsonval_internal!(@object $object () ($($tt)*) ($($tt)*))
    //
    // We require two copies of the input tokens so that we can match on one
    // copy and trigger errors on the other copy.
    //////////////////////////////////////////////////////////////////////////

    // Done.
    (@object $object:ident () () ()) => {};

    // Push the current entry followed by trailing comma.
    (@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        $object.push((($($key)+).into(), $value));
        $crate::jsonval_internal!(@object $object () ($($rest)*) ($($rest)*));
    };

    // Current entry followed by unexpected token.
    (@object $object:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        $crate::jsonval_unexpected!($unexpected);
    };

    // Push the last entry without trailing comma.
    (@object $object:ident [$($key:tt)+] ($value:expr)) => {
        $object.push((($($key)+).into(), $value));
    };

    // Next value is `null`.
    (@object $object:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!(null)) $($rest)*);
    };

    // Next value is `true`.
    (@object $object:ident ($($key:tt)+) (: true $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!(true)) $($rest)*);
    };

    // Next value is `false`.
    (@object $object:ident ($($key:tt)+) (: false $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!(false)) $($rest)*);
    };

    // Next value is an array.
    (@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!([$($array)*])) $($rest)*);
    };

    // Next value is an object.
    (@object $object:ident ($($key:tt)+) (: {$($inner:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!({$($inner)*})) $($rest)*);
    };

    // Next value is an expression followed by comma.
    (@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!($value)) , $($rest)*);
    };

    // Last value is an expression with no trailing comma.
    (@object $object:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::jsonval_internal!(@object $object [$($key)+] ($crate::jsonval_internal!($value)));
    };

    // Missing value for last entry. Trigger a reasonable error message.
    (@object $object:ident ($($key:tt)+) (:) $copy:tt) => {
        // "unexpected end of macro invocation"
        $crate::jsonval_internal!();
    };

    // Missing colon and value for last entry. Trigger a reasonable error
    // message.
    (@object $object:ident ($($key:tt)+) () $copy:tt) => {
        // "unexpected end of macro invocation"
        $crate::jsonval_internal!();
    };

    // Misplaced colon. Trigger a reasonable error message.
    (@object $object:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        // Takes no arguments so "no rules expected the token `:`".
        $crate::jsonval_unexpected!($colon);
    };

    // Found a comma inside a key. Trigger a reasonable error message.
    (@object $object:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        // Takes no arguments so "no rules expected the token `,`".
        $crate::jsonval_unexpected!($comma);
    };

    // Key is fully parenthesized. This avoids clippy double_parens false
    // positives because the parenthesization may be necessary here.
    (@object $object:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object ($key) (: $($rest)*) (: $($rest)*));
    };

    // Refuse to absorb colon token into key expression.
    (@object $object:ident ($($key:tt)*) (: $($unexpected:tt)+) $copy:tt) => {
        $crate::jsonval_expect_expr_comma!($($unexpected)+);
    };

    // Munch a token into the current key.
    (@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::jsonval_internal!(@object $object ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////////
    // The main implementation.
    //
    // Must be invoked as: jsonval_internal!($($json)+)
    //////////////////////////////////////////////////////////////////////////

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::Array($crate::jsonval_internal!(@array [] $($tt)+))
    };

    ({}) => {
        $crate::Value::Object(::std::vec::Vec::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::Object({
            let mut object = ::std::vec::Vec::new();
            $crate::jsonval_internal!(@object object () ($($tt)+) ($($tt)+));
            object
        })
    };

    // Any type that can be represented infallibly: numbers, strings,
    // variables, struct fields, and so on. Must be below every other rule.
    ($other:expr) => {
        $crate::IntoJson::into_json($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! jsonval_unexpected {
    () => {};
}

#[macro_export]
#[doc(hidden)]
macro_rules! jsonval_expect_expr_comma {
    ($e:expr , $($tt:tt)*) => {};
}
