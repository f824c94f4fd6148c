use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clusters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cluster_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sub_clusters::Entity")]
    SubClusters,
}

impl Related<super::sub_clusters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubClusters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
