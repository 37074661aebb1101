//! 结果列表视口：高亮位置 + 首个可见行

use crate::package_manager::{ResultSet, SearchResult};

/// 浏览界面的按键动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    Cancel,
}

/// 处理一个动作后的去向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 继续浏览
    Stay,
    /// 安装选中项并回到输入框
    Install(SearchResult),
    /// 不安装，回到输入框
    Leave,
}

/// 不变式（结果非空时）：
/// `first_visible <= highlight < first_visible + page_size` 且 `highlight < len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    highlight: usize,
    first_visible: usize,
    page_size: usize,
}

impl ViewportState {
    pub fn new(page_size: usize) -> Self {
        Self {
            highlight: 0,
            first_visible: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 当前可见的下标范围
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        self.first_visible.min(len)..(self.first_visible + self.page_size).min(len)
    }

    pub fn navigate_up(&mut self, len: usize, wrap: bool) {
        if len == 0 {
            return;
        }
        if self.highlight == 0 {
            if wrap {
                self.jump_to(len - 1);
            }
            return;
        }
        self.highlight -= 1;
        if self.highlight < self.first_visible {
            self.first_visible = self.highlight;
        }
    }

    pub fn navigate_down(&mut self, len: usize, wrap: bool) {
        if len == 0 {
            return;
        }
        if self.highlight + 1 >= len {
            if wrap {
                self.jump_to(0);
            }
            return;
        }
        self.highlight += 1;
        if self.highlight >= self.first_visible + self.page_size {
            self.first_visible = self.highlight + 1 - self.page_size;
        }
    }

    pub fn page_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.jump_to(self.highlight.saturating_sub(self.page_size));
    }

    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.jump_to((self.highlight + self.page_size).min(len - 1));
    }

    pub fn home(&mut self) {
        self.jump_to(0);
    }

    pub fn end(&mut self, len: usize) {
        if len > 0 {
            self.jump_to(len - 1);
        }
    }

    /// 终端尺寸变化：保持高亮行，必要时调整首行
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.scroll_to_highlight();
    }

    fn jump_to(&mut self, index: usize) {
        self.highlight = index;
        self.scroll_to_highlight();
    }

    fn scroll_to_highlight(&mut self) {
        if self.highlight < self.first_visible {
            self.first_visible = self.highlight;
        } else if self.highlight >= self.first_visible + self.page_size {
            self.first_visible = self.highlight + 1 - self.page_size;
        }
    }
}

/// 浏览状态机：Empty（无结果）或 Browsing
#[derive(Debug, Clone)]
pub enum Viewport {
    Empty,
    Browsing {
        results: ResultSet,
        state: ViewportState,
        wrap: bool,
    },
}

impl Viewport {
    pub fn open(results: ResultSet, page_size: usize, wrap: bool) -> Self {
        if results.is_empty() {
            Viewport::Empty
        } else {
            Viewport::Browsing {
                results,
                state: ViewportState::new(page_size),
                wrap,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Viewport::Empty)
    }

    pub fn handle(&mut self, action: Action) -> Transition {
        let Viewport::Browsing {
            results,
            state,
            wrap,
        } = self
        else {
            return Transition::Leave;
        };
        let len = results.len();

        match action {
            Action::Up => state.navigate_up(len, *wrap),
            Action::Down => state.navigate_down(len, *wrap),
            Action::PageUp => state.page_up(len),
            Action::PageDown => state.page_down(len),
            Action::Home => state.home(),
            Action::End => state.end(len),
            Action::Select => {
                return match results.get(state.highlight()) {
                    Some(result) => Transition::Install(result.clone()),
                    None => Transition::Leave,
                };
            }
            Action::Cancel => return Transition::Leave,
        }
        Transition::Stay
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if let Viewport::Browsing { state, .. } = self {
            state.set_page_size(page_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::{SearchResult, Source, MAX_RESULTS};

    fn results(n: usize) -> ResultSet {
        ResultSet::from_ordered(
            (0..n).map(|i| SearchResult::new(Source::Remote, &format!("pkg{i}"), None)),
            MAX_RESULTS,
        )
    }

    fn assert_invariant(state: &ViewportState, len: usize) {
        assert!(state.highlight() < len, "{state:?} len={len}");
        assert!(state.first_visible() <= state.highlight(), "{state:?}");
        assert!(state.highlight() < state.first_visible() + state.page_size(), "{state:?}");
    }

    #[test]
    fn up_at_top_clamps() {
        let mut state = ViewportState::new(5);
        state.navigate_up(10, false);
        assert_eq!(state.highlight(), 0);
        assert_eq!(state.first_visible(), 0);
    }

    #[test]
    fn down_at_bottom_clamps() {
        let mut state = ViewportState::new(5);
        for _ in 0..20 {
            state.navigate_down(3, false);
        }
        assert_eq!(state.highlight(), 2);
        state.navigate_down(3, false);
        assert_eq!(state.highlight(), 2);
    }

    #[test]
    fn down_scrolls_one_row_past_page() {
        let mut state = ViewportState::new(3);
        for _ in 0..3 {
            state.navigate_down(10, false);
        }
        assert_eq!(state.highlight(), 3);
        assert_eq!(state.first_visible(), 1);
        for _ in 0..3 {
            state.navigate_up(10, false);
        }
        assert_eq!(state.highlight(), 0);
        assert_eq!(state.first_visible(), 0);
    }

    #[test]
    fn wrap_is_opt_in() {
        let mut state = ViewportState::new(4);
        state.navigate_up(10, true);
        assert_eq!(state.highlight(), 9);
        assert_eq!(state.first_visible(), 6);
        assert_invariant(&state, 10);
        state.navigate_down(10, true);
        assert_eq!(state.highlight(), 0);
        assert_eq!(state.first_visible(), 0);
    }

    #[test]
    fn paging_and_jumps_keep_highlight_visible() {
        let mut state = ViewportState::new(4);
        state.page_down(10);
        assert_eq!(state.highlight(), 4);
        assert_invariant(&state, 10);
        state.end(10);
        assert_eq!(state.highlight(), 9);
        assert_eq!(state.first_visible(), 6);
        state.page_up(10);
        assert_eq!(state.highlight(), 5);
        assert_invariant(&state, 10);
        state.home();
        assert_eq!((state.highlight(), state.first_visible()), (0, 0));
    }

    #[test]
    fn resize_keeps_highlight_visible() {
        let mut state = ViewportState::new(10);
        state.end(30);
        state.set_page_size(3);
        assert_eq!(state.highlight(), 29);
        assert_invariant(&state, 30);
        state.set_page_size(0);
        assert_eq!(state.page_size(), 1);
        assert_invariant(&state, 30);
    }

    /// 顶部、中段、末页，以及末页后缩放/放大窗口得到的起始状态
    fn starting_states(len: usize, page_size: usize) -> Vec<ViewportState> {
        let mut states = vec![ViewportState::new(page_size)];
        for index in [len / 2, len - 1] {
            let mut state = ViewportState::new(page_size);
            state.jump_to(index);
            states.push(state);
        }
        for resized in [1, page_size + 3] {
            let mut state = ViewportState::new(page_size);
            state.end(len);
            state.set_page_size(resized);
            states.push(state);
        }
        // 高亮在中段且位于窗口底部
        let mut state = ViewportState::new(page_size);
        for _ in 0..len / 2 {
            state.navigate_down(len, false);
        }
        states.push(state);
        states
    }

    #[test]
    fn invariant_holds_for_any_navigation_sequence() {
        // 简单 LCG，保证序列可复现
        let mut seed: u64 = 0x2545_f491;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        for len in 1..=25 {
            for page_size in 1..=8 {
                for (start, wrap) in starting_states(len, page_size)
                    .into_iter()
                    .flat_map(|s| [(s, false), (s, true)])
                {
                    let mut state = start;
                    assert_invariant(&state, len);
                    for _ in 0..200 {
                        match next() % 9 {
                            0 | 1 => state.navigate_up(len, wrap),
                            2 | 3 => state.navigate_down(len, wrap),
                            4 => state.page_down(len),
                            5 => state.page_up(len),
                            6 => state.home(),
                            7 => state.end(len),
                            _ => state.set_page_size(next() % 10),
                        }
                        assert_invariant(&state, len);
                    }
                }
            }
        }
    }

    #[test]
    fn visible_range_is_bounded_by_len() {
        let mut state = ViewportState::new(10);
        assert_eq!(state.visible_range(4), 0..4);
        state.end(25);
        assert_eq!(state.visible_range(25), 15..25);
    }

    #[test]
    fn empty_results_open_empty_viewport() {
        let mut viewport = Viewport::open(ResultSet::default(), 10, false);
        assert!(viewport.is_empty());
        assert_eq!(viewport.handle(Action::Select), Transition::Leave);
        assert_eq!(viewport.handle(Action::Down), Transition::Leave);
    }

    #[test]
    fn select_emits_highlighted_result() {
        let mut viewport = Viewport::open(results(5), 2, false);
        assert_eq!(viewport.handle(Action::Down), Transition::Stay);
        assert_eq!(viewport.handle(Action::Down), Transition::Stay);
        match viewport.handle(Action::Select) {
            Transition::Install(result) => assert_eq!(result.name(), "pkg2"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cancel_leaves_without_result() {
        let mut viewport = Viewport::open(results(3), 2, false);
        assert_eq!(viewport.handle(Action::Cancel), Transition::Leave);
    }
}
