pub trait HasOrderingColumns: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
    fn created_column() -> Self::Column;
}

pub trait TimestampedActiveModel {
    fn set_created(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
    fn set_updated(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone);
    fn updated(&self) -> Option<sea_orm::entity::prelude::DateTimeWithTimeZone>;
}
