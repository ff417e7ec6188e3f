use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_showrooms_table::Migration),
            Box::new(m20240101_000002_create_product_groups_table::Migration),
            Box::new(m20240101_000003_create_purchases_tables::Migration),
            Box::new(m20240101_000004_create_products_table::Migration),
            Box::new(m20240101_000005_create_customers_tables::Migration),
            Box::new(m20240101_000006_create_employees_table::Migration),
            Box::new(m20240101_000007_create_returns_tables::Migration),
            Box::new(m20240101_000008_create_transfers_tables::Migration),
            Box::new(m20240101_000009_create_invoices_tables::Migration),
            Box::new(m20240101_000010_create_users_table::Migration),
        ]
    }
}

mod m20240101_000001_create_showrooms_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_showrooms_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Showrooms::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Showrooms::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Showrooms::ShowroomCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Showrooms::ShowroomName).string().not_null())
                        .col(
                            ColumnDef::new(Showrooms::ShowroomAddress)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Showrooms::ShowroomMobile).string().null())
                        .col(
                            ColumnDef::new(Showrooms::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Showrooms::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Showrooms::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Showrooms {
        Table,
        Id,
        ShowroomCode,
        ShowroomName,
        ShowroomAddress,
        ShowroomMobile,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_product_groups_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_product_groups_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductGroups::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductGroups::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductGroups::ProductCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductGroups::ProductName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ProductGroups::ProductCategory)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductGroups::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductGroups::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductGroups::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductGroups {
        Table,
        Id,
        ProductCode,
        ProductName,
        ProductCategory,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_purchases_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_purchases_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Purchases::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Purchases::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Purchases::InvoiceNo).string().not_null())
                        .col(ColumnDef::new(Purchases::SupplierName).string().not_null())
                        .col(
                            ColumnDef::new(Purchases::PurchaseAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Purchases::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(Purchases::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ShowroomPurchases::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ShowroomPurchases::ShowroomId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShowroomPurchases::PurchaseId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ShowroomPurchases::ShowroomId)
                                .col(ShowroomPurchases::PurchaseId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ShowroomPurchases::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Purchases::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Purchases {
        Table,
        Id,
        InvoiceNo,
        SupplierName,
        PurchaseAmount,
        Quantity,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ShowroomPurchases {
        Table,
        ShowroomId,
        PurchaseId,
    }
}

mod m20240101_000004_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::ItemCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::ProductCode).string().null())
                        .col(ColumnDef::new(Products::ProductGroup).string().not_null())
                        .col(ColumnDef::new(Products::ShowroomName).string().not_null())
                        .col(ColumnDef::new(Products::SupplierName).string().null())
                        .col(ColumnDef::new(Products::LotNumber).string().null())
                        .col(ColumnDef::new(Products::Size).string().null())
                        .col(ColumnDef::new(Products::UnitCost).decimal().not_null())
                        .col(ColumnDef::new(Products::SellPrice).decimal().not_null())
                        .col(
                            ColumnDef::new(Products::SellPriceAfterDiscount)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::GrossProfit).decimal().not_null())
                        .col(ColumnDef::new(Products::GrossMargin).decimal().not_null())
                        .col(
                            ColumnDef::new(Products::SellingStatus)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::ReturnStatus)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Products::Tagless)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Products::InvoiceDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Products::DeliveryDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Products::ChallanNumber).string().null())
                        .col(ColumnDef::new(Products::InvoiceNumber).string().null())
                        .col(
                            ColumnDef::new(Products::InvoiceTotalPrice)
                                .decimal()
                                .null(),
                        )
                        .col(ColumnDef::new(Products::TotalItem).integer().null())
                        .col(
                            ColumnDef::new(Products::TransportationCost)
                                .decimal()
                                .null(),
                        )
                        .col(ColumnDef::new(Products::PurchaseName).string().null())
                        .col(ColumnDef::new(Products::EmployeeId).uuid().null())
                        .col(ColumnDef::new(Products::InvoiceId).uuid().null())
                        .col(ColumnDef::new(Products::PurchaseId).uuid().null())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_showroom_name")
                        .table(Products::Table)
                        .col(Products::ShowroomName)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_selling_status")
                        .table(Products::Table)
                        .col(Products::SellingStatus)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        ItemCode,
        ProductCode,
        ProductGroup,
        ShowroomName,
        SupplierName,
        LotNumber,
        Size,
        UnitCost,
        SellPrice,
        SellPriceAfterDiscount,
        GrossProfit,
        GrossMargin,
        SellingStatus,
        ReturnStatus,
        Tagless,
        InvoiceDate,
        DeliveryDate,
        ChallanNumber,
        InvoiceNumber,
        InvoiceTotalPrice,
        TotalItem,
        TransportationCost,
        PurchaseName,
        EmployeeId,
        InvoiceId,
        PurchaseId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000005_create_customers_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_customers_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::CustomerName).string().not_null())
                        .col(
                            ColumnDef::new(Customers::CustomerPhone)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Customers::CustomerEmail).string().null())
                        .col(ColumnDef::new(Customers::CustomerAddress).string().null())
                        .col(
                            ColumnDef::new(Customers::Credit)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Customers::Paid)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Customers::ShowroomId).uuid().null())
                        .col(ColumnDef::new(Customers::Crm).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CustomerProductLinks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CustomerProductLinks::CustomerId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerProductLinks::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerProductLinks::Kind)
                                .string_len(16)
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(CustomerProductLinks::CustomerId)
                                .col(CustomerProductLinks::ProductId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CustomerProductLinks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
        CustomerName,
        CustomerPhone,
        CustomerEmail,
        CustomerAddress,
        Credit,
        Paid,
        ShowroomId,
        Crm,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum CustomerProductLinks {
        Table,
        CustomerId,
        ProductId,
        Kind,
    }
}

mod m20240101_000006_create_employees_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_employees_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::EmployeeName).string().not_null())
                        .col(ColumnDef::new(Employees::EmployeePhone).string().null())
                        .col(ColumnDef::new(Employees::ShowroomName).string().null())
                        .col(
                            ColumnDef::new(Employees::SaleCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Employees::SaleAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Employees::ReturnSaleCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Employees::ReturnSaleAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Employees::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Employees::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Employees {
        Table,
        Id,
        EmployeeName,
        EmployeePhone,
        ShowroomName,
        SaleCount,
        SaleAmount,
        ReturnSaleCount,
        ReturnSaleAmount,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_returns_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_returns_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ReturnProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReturnProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReturnProducts::CheckPercent)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReturnProducts::Exchange)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReturnProducts::Amount).decimal().not_null())
                        .col(
                            ColumnDef::new(ReturnProducts::Cash)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ReturnProducts::Bkash)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ReturnProducts::Cbl)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(ReturnProducts::CustomerPhone).string().null())
                        .col(
                            ColumnDef::new(ReturnProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReturnProductItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReturnProductItems::ReturnId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReturnProductItems::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ReturnProductItems::ReturnId)
                                .col(ReturnProductItems::ProductId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ReturnProductItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReturnProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ReturnProducts {
        Table,
        Id,
        CheckPercent,
        Exchange,
        Amount,
        Cash,
        Bkash,
        Cbl,
        CustomerPhone,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ReturnProductItems {
        Table,
        ReturnId,
        ProductId,
    }
}

mod m20240101_000008_create_transfers_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_transfers_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TransferProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TransferProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferProducts::PrevLocation)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferProducts::CurrentLocation)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferProducts::ProductCount)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TransferProductItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TransferProductItems::TransferId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransferProductItems::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(TransferProductItems::TransferId)
                                .col(TransferProductItems::ProductId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TransferProductItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TransferProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum TransferProducts {
        Table,
        Id,
        PrevLocation,
        CurrentLocation,
        ProductCount,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum TransferProductItems {
        Table,
        TransferId,
        ProductId,
    }
}

mod m20240101_000009_create_invoices_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_invoices_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Invoices::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Invoices::ShowroomInvoiceCode)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Invoices::InvoiceAmount).decimal().not_null())
                        .col(ColumnDef::new(Invoices::NetAmount).decimal().not_null())
                        .col(
                            ColumnDef::new(Invoices::Cash)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::Bkash)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Invoices::Cbl)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Invoices::CustomerName).string().null())
                        .col(ColumnDef::new(Invoices::CustomerMobile).string().null())
                        .col(ColumnDef::new(Invoices::ShowroomId).uuid().not_null())
                        .col(ColumnDef::new(Invoices::ShowroomName).string().not_null())
                        .col(ColumnDef::new(Invoices::ShowroomAddress).string().null())
                        .col(ColumnDef::new(Invoices::ShowroomMobile).string().null())
                        .col(
                            ColumnDef::new(Invoices::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Invoices::ReturnQuantity).integer().null())
                        .col(ColumnDef::new(Invoices::ReturnId).uuid().null())
                        .col(
                            ColumnDef::new(Invoices::IsHold)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Invoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_showroom_id")
                        .table(Invoices::Table)
                        .col(Invoices::ShowroomId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_invoices_showroom_invoice_code")
                        .table(Invoices::Table)
                        .col(Invoices::ShowroomInvoiceCode)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Payments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::Amount).decimal().not_null())
                        .col(
                            ColumnDef::new(Payments::PaymentMethod)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::InvoiceId).uuid().null())
                        .col(
                            ColumnDef::new(Payments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        Id,
        ShowroomInvoiceCode,
        InvoiceAmount,
        NetAmount,
        Cash,
        Bkash,
        Cbl,
        CustomerName,
        CustomerMobile,
        ShowroomId,
        ShowroomName,
        ShowroomAddress,
        ShowroomMobile,
        Quantity,
        ReturnQuantity,
        ReturnId,
        IsHold,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum Payments {
        Table,
        Id,
        Amount,
        PaymentMethod,
        InvoiceId,
        CreatedAt,
    }
}

mod m20240101_000010_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Role).string_len(16).not_null())
                        .col(ColumnDef::new(Users::AssignedShowroom).string().null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        Name,
        Username,
        Email,
        PasswordHash,
        Role,
        AssignedShowroom,
        CreatedAt,
        UpdatedAt,
    }
}
