//! `define_port_error!` declares a port's `thiserror` enum together with a
//! snake_case constructor per variant, so adapters write
//! `ReportRepositoryError::query(err.to_string())` and
//! `FoodListingRepositoryError::duplicate(food_id)`.
//!
//! Every variant carries named fields; constructor parameters accept
//! anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage using the crate's own port errors.

    use rstest::rstest;

    use crate::domain::FoodId;
    use crate::domain::ports::{
        FoodListingRepositoryError, ReportRepositoryError, TableSourceError,
    };

    #[rstest]
    #[case(
        TableSourceError::missing("claims_data.csv").to_string(),
        "table source claims_data.csv not found"
    )]
    #[case(
        TableSourceError::header("missing column Food_ID").to_string(),
        "table source header invalid: missing column Food_ID"
    )]
    #[case(
        ReportRepositoryError::query("no such table: Claims".to_owned()).to_string(),
        "report query failed: no such table: Claims"
    )]
    fn constructors_accept_str_and_string(#[case] message: String, #[case] expected: &str) {
        assert_eq!(message, expected);
    }

    #[rstest]
    fn constructors_preserve_non_string_fields() {
        let error = FoodListingRepositoryError::duplicate(FoodId::new(42));

        assert_eq!(
            error,
            FoodListingRepositoryError::Duplicate {
                food_id: FoodId::new(42)
            }
        );
        assert_eq!(error.to_string(), "food listing 42 already exists");
    }

    #[rstest]
    fn constructors_build_the_named_variant() {
        assert!(matches!(
            TableSourceError::row("line 3: invalid digit"),
            TableSourceError::Row { message } if message == "line 3: invalid digit"
        ));
    }
}
