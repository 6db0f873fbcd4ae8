//! Helpers for deduplicating usage data synced from remote servers.
//!
//! Remote servers upload audit rows and count rows in batches, each row
//! tagged with the id it had on the remote side. Batches must arrive in
//! ascending `remote_id` order; rows at or below the stored high-water mark
//! have been seen before and are skipped.

use crate::error::RequestError;

/// Verify that a batch's remote ids are strictly ascending.
pub fn check_ascending_order(remote_ids: &[i64]) -> Result<(), RequestError> {
    for pair in remote_ids.windows(2) {
        if pair[1] <= pair[0] {
            return Err(RequestError::new("Data is out of order."));
        }
    }
    Ok(())
}

/// Keep only rows whose remote id is above the stored high-water mark.
///
/// `floor` is the largest remote id already stored for this server and
/// table, or `None` when nothing has been synced yet.
pub fn filter_new_rows<T>(rows: Vec<T>, floor: Option<i64>, remote_id: impl Fn(&T) -> i64) -> Vec<T> {
    match floor {
        Some(floor) => rows.into_iter().filter(|r| remote_id(r) > floor).collect(),
        None => rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_order_ok() {
        assert!(check_ascending_order(&[1, 2, 5, 9]).is_ok());
        assert!(check_ascending_order(&[3]).is_ok());
        assert!(check_ascending_order(&[]).is_ok());
    }

    #[test]
    fn test_descending_rejected() {
        let err = check_ascending_order(&[1, 3, 2]).unwrap_err();
        assert_eq!(err.message, "Data is out of order.");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        assert!(check_ascending_order(&[1, 1]).is_err());
    }

    #[test]
    fn test_filter_new_rows_with_floor() {
        let rows = vec![1i64, 2, 3, 4, 5];
        let fresh = filter_new_rows(rows, Some(3), |r| *r);
        assert_eq!(fresh, vec![4, 5]);
    }

    #[test]
    fn test_filter_new_rows_all_seen() {
        let rows = vec![1i64, 2];
        let fresh = filter_new_rows(rows, Some(5), |r| *r);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_filter_new_rows_no_floor() {
        let rows = vec![7i64, 8];
        let fresh = filter_new_rows(rows, None, |r| *r);
        assert_eq!(fresh, vec![7, 8]);
    }
}
