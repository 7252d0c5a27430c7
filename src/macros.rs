/// Declare an entity struct together with its [`Entity`](crate::Entity) implementation
///
/// Two forms are supported. A `class` declares each member's setter modifiers in brackets;
/// only members marked `VIRTUAL` (and not `FINAL` or `STATIC`) are tracked. An `interface`
/// declares members without modifiers; all of them are tracked.
///
/// Each member is written as `"Name" => field: Type`, where `"Name"` is the member name used by
/// the tracking API and `field` the Rust field it is stored in. `Type` must implement
/// [`MemberValue`](crate::entity::MemberValue); `Option<T>` declares a nullable member.
///
/// ```rust
/// use chic_tracking::entity;
///
/// entity! {
///     #[derive(Debug, Default, Clone)]
///     pub class Product {
///         "Name" => name: Option<String> [VIRTUAL],
///         "Sku" => sku: Option<String> [],
///         "Stock" => stock: i32 [VIRTUAL | FINAL],
///         "Price" => price: Option<chic_tracking::entity::Decimal> [VIRTUAL],
///     }
/// }
///
/// entity! {
///     #[derive(Debug, Default)]
///     pub interface Labelled {
///         "Label" => label: Option<String>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis class $name:ident {
            $(
                $(#[$field_meta:meta])*
                $label:literal => $field:ident : $ty:ty [$($flag:ident)|*]
            ),* $(,)?
        }
    ) => {
        $crate::entity!(@impl
            [$(#[$meta])*] $vis $name Class;
            $( [$(#[$field_meta])*] $label $field [$ty] [$($flag)|*] );*
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis interface $name:ident {
            $(
                $(#[$field_meta:meta])*
                $label:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::entity!(@impl
            [$(#[$meta])*] $vis $name Interface;
            $( [$(#[$field_meta])*] $label $field [$ty] [VIRTUAL | ABSTRACT] );*
        );
    };

    (@impl
        [$(#[$meta:meta])*] $vis:vis $name:ident $kind:ident;
        $( [$(#[$field_meta:meta])*] $label:literal $field:ident [$ty:ty] [$($flag:ident)|*] );*
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::Entity for $name {
            fn shape() -> $crate::entity::EntityShape {
                $crate::entity::EntityShape::new(
                    stringify!($name),
                    $crate::entity::ShapeKind::$kind,
                )
                $(
                    .member(
                        $crate::entity::MemberDescriptor::new(
                            $label,
                            <$ty as $crate::entity::MemberValue>::MEMBER_TYPE,
                        )
                        .with_setter(
                            $crate::entity::AccessorFlags::empty()
                                $(| $crate::entity::AccessorFlags::$flag)*
                        ),
                    )
                )*
            }

            fn read(&self, member: &str) -> ::core::option::Option<$crate::entity::Value> {
                match member {
                    $(
                        $label => ::core::option::Option::Some(
                            $crate::entity::MemberValue::into_value(
                                ::core::clone::Clone::clone(&self.$field),
                            ),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn write(
                &mut self,
                member: &str,
                value: $crate::entity::Value,
            ) -> $crate::Result<()> {
                match member {
                    $(
                        $label => {
                            self.$field =
                                <$ty as $crate::entity::MemberValue>::from_member_value(member, value)?;
                            ::core::result::Result::Ok(())
                        }
                    )*
                    _ => ::core::result::Result::Err($crate::Error::MemberNotFound(member.to_string())),
                }
            }
        }
    };
}
