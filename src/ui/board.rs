use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{DrawingArea, EventControllerMotion, GestureClick};
use tracing::debug;

use super::rendering::{self, Captions, REF_HEIGHT, REF_WIDTH};
use super::state::AppState;
use crate::game::logic::MoveResult;
use crate::i18n::I18n;

/// How long a finished game's result stays on the board.
pub const RESULT_PAUSE: Duration = Duration::from_millis(1500);

/// Create the board drawing area with draw, click and hover handling.
/// `on_finished` runs once the result pause after a win or draw is over.
pub fn create_board(
    state: Rc<RefCell<AppState>>,
    i18n: Rc<I18n>,
    on_finished: impl Fn() + Clone + 'static,
) -> DrawingArea {
    let drawing_area = DrawingArea::new();
    drawing_area.set_content_width(REF_WIDTH as i32);
    drawing_area.set_content_height(REF_HEIGHT as i32);
    drawing_area.set_hexpand(true);
    drawing_area.set_vexpand(true);

    // --- Draw handler ---
    {
        let state = state.clone();
        let i18n = i18n.clone();
        drawing_area.set_draw_func(move |_area, cr, w, h| {
            let st = state.borrow();
            let Some(session) = st.session.as_ref() else {
                return;
            };
            let status = rendering::status_message(session, &i18n);
            let result = rendering::result_message(session.outcome(), &i18n);
            rendering::render(
                cr,
                session,
                st.palette(),
                Captions {
                    status: &status,
                    result: result.as_deref(),
                },
                st.hovered,
                w,
                h,
            );
        });
    }

    // --- Click handler ---
    {
        let state = state.clone();
        let da = drawing_area.clone();
        let click = GestureClick::new();
        click.connect_released(move |_gesture, _n, x, y| {
            let Some((row, col)) = rendering::mouse_to_cell(x, y, da.width(), da.height()) else {
                return;
            };
            let mut st = state.borrow_mut();
            if st.showing_result {
                return;
            }
            let Some(session) = st.session.as_mut() else {
                return;
            };
            let result = session.place(row, col);
            debug!(row, col, ?result, "board click");
            if let MoveResult::GameOver(_) = result {
                st.showing_result = true;
                let on_finished = on_finished.clone();
                glib::timeout_add_local_once(RESULT_PAUSE, move || on_finished());
            }
            drop(st);
            da.queue_draw();
        });
        drawing_area.add_controller(click);
    }

    // --- Mouse move handler ---
    {
        let leave_state = state.clone();
        let leave_da = drawing_area.clone();
        let da = drawing_area.clone();
        let motion = EventControllerMotion::new();
        motion.connect_motion(move |_ctrl, x, y| {
            let cell = rendering::mouse_to_cell(x, y, da.width(), da.height());
            let mut st = state.borrow_mut();
            if st.hovered != cell {
                st.hovered = cell;
                drop(st);
                da.queue_draw();
            }
        });
        motion.connect_leave(move |_ctrl| {
            leave_state.borrow_mut().hovered = None;
            leave_da.queue_draw();
        });
        drawing_area.add_controller(motion);
    }

    drawing_area
}
