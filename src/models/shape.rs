use crate::models::ExportRecord;

/// Checks that `records` hold exactly `len` legs, tolerating one trailing reward record.
///
/// Accepted layouts:
/// - `len` records whose last record is not a reward,
/// - `len` records where only the last one is a reward,
/// - `len + 1` records where only the extra last record is a reward.
pub fn matches_shape(records: &[ExportRecord], len: usize) -> bool {
    let Some((last, body)) = records.split_last() else {
        return len == 0;
    };

    if records.len() == len {
        return !last.is_reward() || body.iter().all(|record| !record.is_reward());
    }

    if records.len() == len + 1 && last.is_reward() {
        return body.last().is_none_or(|record| !record.is_reward());
    }

    false
}

/// Records split into `N` positional legs and an optional trailing reward.
#[derive(Debug)]
pub struct Shaped<const N: usize> {
    pub legs: [ExportRecord; N],
    pub reward: Option<ExportRecord>
}

impl<const N: usize> Shaped<N> {
    pub fn into_records(self) -> Vec<ExportRecord> {
        let mut records = Vec::from(self.legs);
        records.extend(self.reward);
        records
    }
}

/// Takes ownership of `records` as `N` legs when they match [`matches_shape`],
/// handing them back untouched otherwise.
pub fn shape<const N: usize>(mut records: Vec<ExportRecord>) -> Result<Shaped<N>, Vec<ExportRecord>> {
    if !matches_shape(&records, N) {
        return Err(records);
    }

    let reward = if records.len() == N + 1 { records.pop() } else { None };

    match <[ExportRecord; N]>::try_from(records) {
        Ok(legs) => Ok(Shaped { legs, reward }),
        Err(mut records) => {
            records.extend(reward);
            Err(records)
        }
    }
}

/// Borrows the first `N` legs for in-place relabelling when the shape matches.
pub fn legs_mut<const N: usize>(records: &mut [ExportRecord]) -> Option<&mut [ExportRecord; N]> {
    if !matches_shape(records, N) {
        return None;
    }

    records.get_mut(..N)?.try_into().ok()
}
