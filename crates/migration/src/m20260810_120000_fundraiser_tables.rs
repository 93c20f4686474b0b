use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Orders {
    Table,
    OrderId,
    OrderOwnerId,
    LastModifiedTime,
    Comments,
    SpecialInstructions,
    AmountFromDonations,
    AmountFromPurchases,
    CashAmountCollected,
    CheckAmountCollected,
    TotalAmountCollected,
    CheckNumbers,
    DeliveryId,
    WillCollectMoneyLater,
    IsVerified,
    Purchases,
    CustomerName,
    CustomerAddr1,
    CustomerAddr2,
    CustomerCity,
    CustomerZipcode,
    CustomerPhone,
    CustomerEmail,
    CustomerNeighborhood,
}

#[derive(Iden)]
enum OrderSpreaders {
    Table,
    OrderId,
    Spreaders,
}

#[derive(Iden)]
enum DeliveryTimecards {
    Table,
    Uid,
    DeliveryId,
    LastModifiedTime,
    TimeIn,
    TimeOut,
    TimeTotal,
}

#[derive(Iden)]
enum FundraiserConfig {
    Table,
    Kind,
    Description,
    LastModifiedTime,
    DeliveryEvents,
    Products,
    CloseoutFigures,
    IsLocked,
}

#[derive(Iden)]
enum Neighborhoods {
    Table,
    Name,
    Zipcode,
    City,
    IsVisible,
    DistPt,
    LastModifiedTime,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    GroupId,
    FirstName,
    LastName,
    CreatedTime,
    LastModifiedTime,
    HasAuthCreds,
}

#[derive(Iden)]
enum AllocationSummary {
    Table,
    Uid,
    BagsSold,
    BagsSpread,
    DeliveryMinutes,
    TotalDonations,
    AllocationFromBagsSold,
    AllocationFromBagsSpread,
    AllocationFromDelivery,
    AllocationTotal,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Monetary amounts and clock values are stored as text; the engine
        // parses them into exact decimals / durations.
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::OrderId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::OrderOwnerId).string())
                    .col(ColumnDef::new(Orders::LastModifiedTime).string())
                    .col(ColumnDef::new(Orders::Comments).string())
                    .col(ColumnDef::new(Orders::SpecialInstructions).string())
                    .col(ColumnDef::new(Orders::AmountFromDonations).string())
                    .col(ColumnDef::new(Orders::AmountFromPurchases).string())
                    .col(ColumnDef::new(Orders::CashAmountCollected).string())
                    .col(ColumnDef::new(Orders::CheckAmountCollected).string())
                    .col(ColumnDef::new(Orders::TotalAmountCollected).string())
                    .col(ColumnDef::new(Orders::CheckNumbers).string())
                    .col(ColumnDef::new(Orders::DeliveryId).big_integer())
                    .col(ColumnDef::new(Orders::WillCollectMoneyLater).boolean())
                    .col(ColumnDef::new(Orders::IsVerified).boolean())
                    .col(ColumnDef::new(Orders::Purchases).string())
                    .col(ColumnDef::new(Orders::CustomerName).string())
                    .col(ColumnDef::new(Orders::CustomerAddr1).string())
                    .col(ColumnDef::new(Orders::CustomerAddr2).string())
                    .col(ColumnDef::new(Orders::CustomerCity).string())
                    .col(
                        ColumnDef::new(Orders::CustomerZipcode)
                            .big_integer()
                            .check(Expr::col(Orders::CustomerZipcode).gte(0)),
                    )
                    .col(ColumnDef::new(Orders::CustomerPhone).string())
                    .col(ColumnDef::new(Orders::CustomerEmail).string())
                    .col(ColumnDef::new(Orders::CustomerNeighborhood).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-order_owner_id")
                    .table(Orders::Table)
                    .col(Orders::OrderOwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderSpreaders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderSpreaders::OrderId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderSpreaders::Spreaders).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeliveryTimecards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DeliveryTimecards::Uid).string().not_null())
                    .col(
                        ColumnDef::new(DeliveryTimecards::DeliveryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeliveryTimecards::LastModifiedTime).string())
                    .col(
                        ColumnDef::new(DeliveryTimecards::TimeIn)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeliveryTimecards::TimeOut).string())
                    .col(ColumnDef::new(DeliveryTimecards::TimeTotal).string())
                    .primary_key(
                        Index::create()
                            .col(DeliveryTimecards::Uid)
                            .col(DeliveryTimecards::DeliveryId)
                            .col(DeliveryTimecards::TimeIn),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FundraiserConfig::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FundraiserConfig::Kind).string())
                    .col(ColumnDef::new(FundraiserConfig::Description).string())
                    .col(ColumnDef::new(FundraiserConfig::LastModifiedTime).string())
                    .col(ColumnDef::new(FundraiserConfig::DeliveryEvents).string())
                    .col(ColumnDef::new(FundraiserConfig::Products).string())
                    .col(ColumnDef::new(FundraiserConfig::CloseoutFigures).string())
                    .col(ColumnDef::new(FundraiserConfig::IsLocked).boolean())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Neighborhoods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Neighborhoods::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Neighborhoods::Zipcode).big_integer())
                    .col(ColumnDef::new(Neighborhoods::City).string())
                    .col(ColumnDef::new(Neighborhoods::IsVisible).boolean())
                    .col(ColumnDef::new(Neighborhoods::DistPt).string())
                    .col(ColumnDef::new(Neighborhoods::LastModifiedTime).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::GroupId).string())
                    .col(ColumnDef::new(Users::FirstName).string())
                    .col(ColumnDef::new(Users::LastName).string())
                    .col(ColumnDef::new(Users::CreatedTime).string())
                    .col(ColumnDef::new(Users::LastModifiedTime).string())
                    .col(ColumnDef::new(Users::HasAuthCreds).boolean())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AllocationSummary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AllocationSummary::Uid)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AllocationSummary::BagsSold).big_integer())
                    .col(ColumnDef::new(AllocationSummary::BagsSpread).string())
                    .col(ColumnDef::new(AllocationSummary::DeliveryMinutes).string())
                    .col(ColumnDef::new(AllocationSummary::TotalDonations).string())
                    .col(ColumnDef::new(AllocationSummary::AllocationFromBagsSold).string())
                    .col(ColumnDef::new(AllocationSummary::AllocationFromBagsSpread).string())
                    .col(ColumnDef::new(AllocationSummary::AllocationFromDelivery).string())
                    .col(ColumnDef::new(AllocationSummary::AllocationTotal).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AllocationSummary::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Neighborhoods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FundraiserConfig::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeliveryTimecards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderSpreaders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        Ok(())
    }
}
