use std::cmp::Ordering;
use std::fmt;

/// Sort key for in-memory records.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }

    fn from_token(token: &str) -> Self {
        const DESC_SUFFIXES: [&str; 3] = [" desc", " descending", " d"];
        if DESC_SUFFIXES.iter().any(|s| token.ends_with(s)) {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => f.write_str("ascending"),
            Direction::Descending => f.write_str("descending"),
        }
    }
}

impl From<Direction> for sea_orm::sea_query::Order {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Ascending => Self::Asc,
            Direction::Descending => Self::Desc,
        }
    }
}

/// A sortable field of a record shape.
#[derive(Debug, Clone, Copy)]
pub struct Field<K> {
    name: &'static str,
    key: K,
}

impl<K: Copy> Field<K> {
    pub const fn new(name: &'static str, key: K) -> Self {
        Self { name, key }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> K {
        self.key
    }
}

/// Ordered list of sortable fields, in declaration order.
///
/// Register a shape with [`impl_field_shape!`](crate::impl_field_shape) for plain
/// structs or [`impl_column_shape!`](crate::impl_column_shape) for sea-orm models.
pub trait RecordShape {
    type Key: Copy + 'static;

    fn fields() -> &'static [Field<Self::Key>];
}

#[derive(Debug, Clone, Copy)]
pub struct OrderClause<K> {
    field: Field<K>,
    direction: Direction,
}

impl<K: Copy> OrderClause<K> {
    pub fn name(&self) -> &'static str {
        self.field.name()
    }

    pub fn key(&self) -> K {
        self.field.key()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<K> fmt::Display for OrderClause<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.name, self.direction)
    }
}

/// Resolved ordering. Displays as `"Name descending, Id ascending"`.
#[derive(Debug, Clone)]
pub struct OrderQuery<K> {
    clauses: Vec<OrderClause<K>>,
}

impl<K: Copy> OrderQuery<K> {
    pub fn clauses(&self) -> &[OrderClause<K>] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<K> fmt::Display for OrderQuery<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// Resolve a sort specification such as `"name desc, id"` against `T`.
///
/// Unknown fields are skipped. When nothing usable remains the first declared
/// field is used ascending; a shape without fields yields an empty query.
pub fn order_query<T: RecordShape>(spec: &str) -> OrderQuery<T::Key> {
    let fields = T::fields();
    let mut clauses = Vec::new();

    for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let name = token.split(' ').next().unwrap_or_default();
        let Some(field) = fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)) else {
            log::trace!("skip unknown sort field: {}", name);
            continue;
        };
        clauses.push(OrderClause {
            field: *field,
            direction: Direction::from_token(token),
        });
    }

    if clauses.is_empty() {
        if let Some(first) = fields.first() {
            clauses.push(OrderClause {
                field: *first,
                direction: Direction::Ascending,
            });
        }
    }

    OrderQuery { clauses }
}

pub trait OrderBy: Sized {
    type Record: RecordShape;

    fn order_by(self, query: &OrderQuery<<Self::Record as RecordShape>::Key>) -> Self;

    /// Order by a caller supplied specification; `None` and blank strings
    /// order by the first declared field.
    fn sort(self, spec: Option<&str>) -> Self {
        let query = order_query::<Self::Record>(spec.unwrap_or_default());
        if query.is_empty() {
            return self;
        }
        log::debug!("order by: {}", query);
        self.order_by(&query)
    }
}

pub(crate) fn compare<T>(query: &OrderQuery<Comparator<T>>, a: &T, b: &T) -> Ordering {
    query.clauses.iter().fold(Ordering::Equal, |ord, c| {
        ord.then_with(|| c.direction.apply((c.field.key)(a, b)))
    })
}

/// Register a plain struct as a [`RecordShape`] keyed by comparators.
///
/// ```ignore
/// impl_field_shape!(User { Id => id, Name => name });
/// ```
#[macro_export]
macro_rules! impl_field_shape {
    ($ty:ty { $($name:ident => $field:ident),* $(,)? }) => {
        impl $crate::order::RecordShape for $ty {
            type Key = $crate::order::Comparator<$ty>;

            fn fields() -> &'static [$crate::order::Field<Self::Key>] {
                static FIELDS: &[$crate::order::Field<$crate::order::Comparator<$ty>>] = &[$(
                    $crate::order::Field::new(
                        stringify!($name),
                        (|a: &$ty, b: &$ty| {
                            ::std::cmp::PartialOrd::partial_cmp(&a.$field, &b.$field)
                                .unwrap_or(::std::cmp::Ordering::Equal)
                        }) as $crate::order::Comparator<$ty>,
                    ),
                )*];
                FIELDS
            }
        }
    };
}

/// Register a sea-orm model as a [`RecordShape`] keyed by its columns.
///
/// ```ignore
/// impl_column_shape!(Model, Column { Id, Name });
/// ```
#[macro_export]
macro_rules! impl_column_shape {
    ($model:ty, $col:ty { $($variant:ident),* $(,)? }) => {
        impl $crate::order::RecordShape for $model {
            type Key = $col;

            fn fields() -> &'static [$crate::order::Field<$col>] {
                type Col = $col;
                static FIELDS: &[$crate::order::Field<Col>] = &[$(
                    $crate::order::Field::new(stringify!($variant), Col::$variant),
                )*];
                FIELDS
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct User {
        id: i64,
        name: String,
    }
    crate::impl_field_shape!(User { Id => id, Name => name });

    struct Unit;
    impl RecordShape for Unit {
        type Key = ();
        fn fields() -> &'static [Field<()>] {
            &[]
        }
    }

    fn resolve(spec: &str) -> String {
        order_query::<User>(spec).to_string()
    }

    #[test]
    fn test_resolve_fields_and_direction() {
        assert_eq!(resolve("name desc, id"), "Name descending, Id ascending");
        assert_eq!(resolve("ID descending"), "Id descending");
        assert_eq!(resolve("name d,id asc"), "Name descending, Id ascending");
        assert_eq!(resolve("  name  ascending "), "Name ascending");
    }

    #[test]
    fn test_resolve_fallback_first_field() {
        assert_eq!(resolve(""), "Id ascending");
        assert_eq!(resolve("   "), "Id ascending");
        assert_eq!(resolve(",,"), "Id ascending");
        assert_eq!(resolve("unknownfield"), "Id ascending");
        assert_eq!(resolve("unknownfield desc"), "Id ascending");
    }

    #[test]
    fn test_resolve_skips_unknown() {
        assert_eq!(resolve("age desc, name desc"), "Name descending");
        assert_eq!(resolve("namedesc, id d"), "Id descending");
    }

    #[test]
    fn test_resolve_direction_suffix() {
        // suffix must follow a space
        assert_eq!(resolve("named"), "Id ascending");
        assert_eq!(resolve("name DESC"), "Name ascending");
        assert_eq!(resolve("name foo desc"), "Name descending");
    }

    #[test]
    fn test_resolve_no_fields() {
        let query = order_query::<Unit>("id desc");
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }

    #[test]
    fn test_compare_multi_key() {
        let mut users = vec![
            User { id: 1, name: "b".into() },
            User { id: 2, name: "a".into() },
            User { id: 3, name: "b".into() },
        ];
        let query = order_query::<User>("name, id desc");
        users.sort_by(|a, b| compare(&query, a, b));
        let ids: Vec<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
