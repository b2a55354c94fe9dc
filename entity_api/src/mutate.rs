use crate::error::Error;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, Iterable, Value,
};
use std::collections::HashMap;

/// Copies every value in `update_map` onto the matching column of
/// `active_model`. Keys that do not name a column of the entity are ignored.
pub fn apply<A, C>(active_model: &mut A, update_map: &UpdateMap)
where
    A: ActiveModelTrait,
    C: ColumnTrait + Iterable,
    A::Entity: EntityTrait<Column = C>,
{
    for column in C::iter() {
        if let Some(value) = update_map.get(&column.to_string()) {
            active_model.set(column, value.clone());
        }
    }
}

/// Updates an existing record in the database using a map of column names to values.
///
/// Only the columns present in the map are written; everything else keeps the
/// value already held by `active_model`.
pub async fn update<A, C>(
    db: &impl ConnectionTrait,
    mut active_model: A,
    update_map: UpdateMap,
) -> Result<<A::Entity as EntityTrait>::Model, Error>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    C: ColumnTrait + Iterable,
    A::Entity: EntityTrait<Column = C>,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    apply::<A, C>(&mut active_model, &update_map);
    Ok(active_model.update(db).await?)
}

/// Column names and the values to write to them.
///
/// A key mapped to `None` is treated as absent. To write SQL `NULL`, insert
/// the column's typed null value, e.g. `Value::ChronoDateTimeWithTimeZone(None)`.
#[derive(Debug, Default)]
pub struct UpdateMap {
    map: HashMap<String, Option<Value>>,
}

impl UpdateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key).and_then(|opt| opt.as_ref())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key).and_then(|opt| opt)
    }

    /// If the key already exists, the value will be overwritten.
    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }

    pub fn is_empty(&self) -> bool {
        self.map.values().all(Option::is_none)
    }
}

/// A trait that allows types to be converted into an UpdateMap.
pub trait IntoUpdateMap {
    fn into_update_map(self) -> UpdateMap;
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::notebooks::{ActiveModel, Column};
    use sea_orm::ActiveValue;

    #[test]
    fn apply_only_touches_mapped_columns() {
        let mut active_model = ActiveModel {
            name: ActiveValue::Unchanged("Old".to_owned()),
            is_pinned: ActiveValue::Unchanged(false),
            ..Default::default()
        };
        let mut update_map = UpdateMap::new();
        update_map.insert("name".to_owned(), Some(Value::from("New")));
        update_map.insert("tags".to_owned(), None);
        update_map.insert("not_a_column".to_owned(), Some(Value::from(1)));

        apply::<ActiveModel, Column>(&mut active_model, &update_map);

        assert_eq!(active_model.name, ActiveValue::Set("New".to_owned()));
        assert_eq!(active_model.is_pinned, ActiveValue::Unchanged(false));
        assert!(active_model.tags.is_not_set());
    }

    #[test]
    fn map_with_only_absent_values_is_empty() {
        let mut update_map = UpdateMap::new();
        assert!(update_map.is_empty());
        update_map.insert("tags".to_owned(), None);
        assert!(update_map.is_empty());
        update_map.insert("name".to_owned(), Some(Value::from("x")));
        assert!(!update_map.is_empty());
    }
}
