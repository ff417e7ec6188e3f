//! Persisted relational records. Associations the original modeled as eagerly
//! loaded many-to-many collections are explicit join tables here, loaded per
//! request.

pub mod customer;
pub mod customer_product_link;
pub mod employee;
pub mod invoice;
pub mod payment;
pub mod product;
pub mod product_group;
pub mod purchase;
pub mod return_product;
pub mod return_product_item;
pub mod showroom;
pub mod showroom_purchase;
pub mod transfer_product;
pub mod transfer_product_item;
pub mod user;
