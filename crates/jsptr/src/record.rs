//! Records: fixed-shape values with named fields.
//!
//! A record declares its fields once, in declaration order, through
//! [`Record::fields`]. The declaration is turned into a name table the first
//! time the record type is navigated (see [`record_shape`](crate::record_shape))
//! and reused afterwards.
//!
//! # Example
//!
//! ```
//! use jsptr::{record, Pointer};
//!
//! struct Inner {
//!     baz: String,
//! }
//!
//! struct Outer {
//!     bar: Inner,
//!     secret: u32,
//! }
//!
//! record!(Inner { pub baz });
//! record!(Outer { pub bar = "barbarbar", hidden secret });
//!
//! let outer = Outer { bar: Inner { baz: "hello".into() }, secret: 7 };
//! let mut out = String::new();
//! Pointer::new("/barbarbar/baz").unwrap().retrieve(&mut out, &outer).unwrap();
//! assert_eq!(out, "hello");
//!
//! let mut n = 0_u32;
//! assert!(Pointer::new("/secret").unwrap().retrieve(&mut n, &outer).is_err());
//! ```

use std::any::TypeId;
use std::fmt;

use serde_json::{Map, Value};

use crate::cache::record_shape;
use crate::{JsonPointerError, Shape, Target};

/// Rename directive that removes a field from the name table.
pub const SKIP: &str = "skip";

/// A value with a fixed set of named fields.
///
/// Implement by hand or with [`record!`](crate::record!). Positions passed
/// to [`Record::field`] are indexes into the list returned by
/// [`Record::fields`].
pub trait Record {
    /// The declared fields, in declaration order.
    fn fields() -> Vec<FieldSpec>
    where
        Self: Sized;

    /// Identity of this record's type. Usually `RecordType::of::<Self>()`.
    fn record_type(&self) -> RecordType;

    /// The field declared at `position`.
    fn field(&self, position: usize) -> Option<&dyn Target>;
}

/// Identity and field declarations of one record type.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
    fields: fn() -> Vec<FieldSpec>,
}

impl RecordType {
    pub fn of<T: Record + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            fields: T::fields,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        (self.fields)()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

/// Declaration of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    tag: Option<&'static str>,
    public: bool,
    embedded: Option<RecordType>,
}

impl FieldSpec {
    /// A public field addressed by its declared name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            public: true,
            embedded: None,
        }
    }

    /// An embedded record whose fields are flattened into the outer one.
    ///
    /// The field itself may hold the record directly or behind an `Option`
    /// or a smart pointer.
    pub fn embedded<T: Record + 'static>(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            public: true,
            embedded: Some(RecordType::of::<T>()),
        }
    }

    /// Attaches a rename directive.
    ///
    /// The text before the first `,` replaces the declared name; an empty
    /// primary component keeps it. A directive of exactly [`SKIP`] hides the
    /// field.
    pub const fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Marks the field as not externally visible.
    pub const fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rename_directive(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn embedded_type(&self) -> Option<RecordType> {
        self.embedded
    }

    /// The name pointer tokens use, or `None` for skipped fields.
    pub fn external_name(&self) -> Option<&'static str> {
        match self.tag {
            Some(SKIP) => None,
            Some(tag) => match tag.split(',').next() {
                Some(primary) if !primary.is_empty() => Some(primary),
                _ => Some(self.name),
            },
            None => Some(self.name),
        }
    }
}

/// Follows references until a record is reached.
pub(crate) fn deref_record<'a>(
    value: &'a dyn Target,
    token: &str,
) -> Result<&'a dyn Record, JsonPointerError> {
    let mut current = value;
    loop {
        match current.shape() {
            Shape::Record(record) => return Ok(record),
            Shape::Reference(Some(inner)) => current = inner,
            Shape::Reference(None) => {
                return Err(JsonPointerError::TypeMismatch(format!(
                    "cannot access field '{token}' of nothing"
                )))
            }
            other => {
                return Err(JsonPointerError::TypeMismatch(format!(
                    "cannot access field '{token}' of {}",
                    other.kind()
                )))
            }
        }
    }
}

/// Generic value of a record: its visible fields keyed by external name.
///
/// Fields below an empty embedded reference are left out.
pub(crate) fn record_value(record: &dyn Record) -> Result<Value, JsonPointerError> {
    let shape = record_shape(record.record_type());
    let mut out = Map::new();
    for (name, descriptor) in shape.fields() {
        let Ok(field) = descriptor.reach(record) else {
            continue;
        };
        out.insert(name.to_string(), field.to_value()?);
    }
    Ok(Value::Object(out))
}

/// Implements [`Record`] and [`Target`] for a struct.
///
/// Fields are listed in declaration order, one per entry:
///
/// - `pub name`: visible under its declared name
/// - `pub name = "tag"`: visible under the tag's primary component
/// - `hidden name`: not addressable
/// - `embed name: Type`: `Type`'s fields are flattened into this record
///
/// ```
/// use jsptr::{record, Pointer};
///
/// struct Base { id: u64 }
/// struct User { base: Option<Box<Base>>, name: String }
///
/// record!(Base { pub id });
/// record!(User { embed base: Base, pub name = "name,omitempty" });
///
/// let user = User { base: Some(Box::new(Base { id: 9 })), name: "ann".into() };
/// let mut id = 0_u64;
/// Pointer::new("/id").unwrap().retrieve(&mut id, &user).unwrap();
/// assert_eq!(id, 9);
/// ```
#[macro_export]
macro_rules! record {
    (@field pub $field:ident) => {
        $crate::FieldSpec::new(stringify!($field))
    };
    (@field pub $field:ident = $tag:literal) => {
        $crate::FieldSpec::new(stringify!($field)).tag($tag)
    };
    (@field hidden $field:ident $(= $tag:literal)?) => {
        $crate::FieldSpec::new(stringify!($field)).private()
    };
    (@field embed $field:ident : $embedded:ty) => {
        $crate::FieldSpec::embedded::<$embedded>(stringify!($field))
    };
    ($ty:ident { $( $kind:tt $field:ident $(: $embedded:ty)? $(= $tag:literal)? ),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> ::std::vec::Vec<$crate::FieldSpec> {
                ::std::vec![
                    $( $crate::record!(@field $kind $field $(: $embedded)? $(= $tag)?) ),*
                ]
            }

            fn record_type(&self) -> $crate::RecordType {
                $crate::RecordType::of::<Self>()
            }

            fn field(&self, position: usize) -> ::std::option::Option<&dyn $crate::Target> {
                let fields: &[&dyn $crate::Target] = &[ $( &self.$field ),* ];
                fields.get(position).copied()
            }
        }

        impl $crate::Target for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(self)
            }
        }
    };
}
