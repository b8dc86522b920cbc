use crate::query::QueryState;

// exactly one of these renders for any reachable fetch state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBranch {
    Loading,
    Error(String),
    Empty,
    Success,
}

// precedence: loading > error > empty > success
pub fn select<T, F>(state: &QueryState<T>, is_empty: F) -> RenderBranch
where
    F: Fn(&T) -> bool,
{
    if state.is_loading {
        return RenderBranch::Loading;
    }
    if state.is_error {
        let message = state
            .error
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string());
        return RenderBranch::Error(message);
    }
    match &state.data {
        Some(data) if !is_empty(data) => RenderBranch::Success,
        _ => RenderBranch::Empty,
    }
}

pub fn select_list<T>(state: &QueryState<Vec<T>>) -> RenderBranch {
    select(state, |records| records.is_empty())
}
