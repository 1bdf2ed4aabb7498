//! Macros for ergonomic state table construction.

/// Declare a fieldless enum of states and implement
/// [`StateId`](crate::core::StateId) for it.
///
/// Variants are numbered in declaration order, which must match the order of
/// the state table.
///
/// # Example
///
/// ```
/// use cycle_fsm::state_ids;
/// use cycle_fsm::core::StateId;
///
/// state_ids! {
///     pub enum Charger {
///         Idle,
///         Bulk,
///         Float,
///     }
/// }
///
/// assert_eq!(Charger::COUNT, 3);
/// assert_eq!(Charger::Float.index(), 2);
/// assert_eq!(Charger::Bulk.name(), "Bulk");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::core::StateId for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}
