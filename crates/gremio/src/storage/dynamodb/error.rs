//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `TableError` from `gremio_core::table`. Every
//! transport or service failure surfaces as `StoreUnavailable`; conditional
//! check failures are classified by the repository itself since their
//! meaning depends on the operation.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use gremio_core::table::TableError;

/// Map a GetItem SDK error to TableError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> TableError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            TableError::StoreUnavailable("table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            TableError::StoreUnavailable("throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            TableError::StoreUnavailable("request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            TableError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => TableError::StoreUnavailable(format!("GetItem failed: {err:?}")),
    }
}

/// Map a Scan SDK error to TableError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> TableError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            TableError::StoreUnavailable("table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            TableError::StoreUnavailable("throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            TableError::StoreUnavailable("request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            TableError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => TableError::StoreUnavailable(format!("Scan failed: {err:?}")),
    }
}

/// Map a PutItem SDK error to TableError.
///
/// Conditional check failures must be handled by the caller before reaching
/// this function; here they fall through to the generic arm.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> TableError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            TableError::StoreUnavailable("table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            TableError::StoreUnavailable("throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            TableError::StoreUnavailable("request limit exceeded, please retry".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            TableError::StoreUnavailable("transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            TableError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => TableError::StoreUnavailable(format!("PutItem failed: {err:?}")),
    }
}

/// Map a DeleteItem SDK error to TableError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> TableError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            TableError::StoreUnavailable("table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            TableError::StoreUnavailable("throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            TableError::StoreUnavailable("request limit exceeded, please retry".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            TableError::StoreUnavailable("transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            TableError::StoreUnavailable("DynamoDB internal server error".to_string())
        }
        err => TableError::StoreUnavailable(format!("DeleteItem failed: {err:?}")),
    }
}
