use std::borrow::Borrow;

use super::plan::QueryPlan;
use super::types::QueryRequest;
use crate::errors::QueryError;
use crate::schema::{FieldValue, Record};
use crate::utils::devlog::QueryBench;

impl<'s, R> QueryPlan<'s, R> {
    /// Run the plan over `records`, which may be owned records or references.
    ///
    /// Without a sort key records stream through filter, skip and take; with one,
    /// the filtered set is collected and stably sorted before the window applies.
    pub fn stream<'p, I, T>(&'p self, records: I) -> Box<dyn Iterator<Item = T> + 'p>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'p,
        T: Borrow<R> + 'p,
    {
        let page = self.window();
        let filtered = records.into_iter().filter(move |r| self.matches(r.borrow()));
        match self.sort() {
            None => Box::new(filtered.skip(page.skip).take(page.take)),
            Some(key) => {
                let mut keyed: Vec<(FieldValue, T)> = filtered.map(|r| (key.field.get(r.borrow()), r)).collect();
                // slice::sort_by is stable: equal keys keep input order.
                keyed.sort_by(|(a, _), (b, _)| key.order(a, b));
                Box::new(keyed.into_iter().skip(page.skip).take(page.take).map(|(_, r)| r))
            }
        }
    }

    pub fn apply<I, T>(&self, records: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        T: Borrow<R>,
    {
        self.stream(records).collect()
    }

    /// Number of records passing filters and search, ignoring sort and paging.
    pub fn count<I, T>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Borrow<R>,
    {
        records.into_iter().filter(|r| self.matches(r.borrow())).count()
    }
}

/// Build a plan for `R` and return the requested page of `records`.
///
/// # Errors
/// Any plan validation error; no records are returned in that case.
pub fn apply_query<'a, R, I>(records: I, request: &QueryRequest) -> Result<Vec<&'a R>, QueryError>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    let bench = QueryBench::start("apply", R::schema().name());
    let plan = QueryPlan::<R>::for_record(request)?;
    let out = plan.apply(records);
    let page = plan.window();
    bench.finish(&[("result_count", out.len()), ("skip", page.skip), ("take", page.take)]);
    Ok(out)
}

/// Count the records of `records` matching the request's filters and search.
///
/// # Errors
/// Any plan validation error, including invalid paging.
pub fn count_matching<'a, R, I>(records: I, request: &QueryRequest) -> Result<usize, QueryError>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    let bench = QueryBench::start("count", R::schema().name());
    let plan = QueryPlan::<R>::for_record(request)?;
    let n = plan.count(records);
    bench.finish(&[("result_count", n)]);
    Ok(n)
}
