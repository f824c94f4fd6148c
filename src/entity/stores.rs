use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sub_cluster_id: i32,
    pub store_name: String,
    pub owner_name: String,
    pub address: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sub_clusters::Entity",
        from = "Column::SubClusterId",
        to = "super::sub_clusters::Column::Id"
    )]
    SubClusters,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::sub_clusters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubClusters.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
