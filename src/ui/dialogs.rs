use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Dialog, Label, ResponseType};

use crate::i18n::I18n;

/// Modal Yes/No question. `on_confirm` runs only on Yes.
pub fn confirm(
    parent: &ApplicationWindow,
    i18n: &I18n,
    title_id: &str,
    message_id: &str,
    on_confirm: impl Fn() + 'static,
) {
    let dialog = Dialog::with_buttons(
        Some(&i18n.t(title_id)),
        Some(parent),
        gtk4::DialogFlags::MODAL | gtk4::DialogFlags::DESTROY_WITH_PARENT,
        &[
            (&i18n.t("yes"), ResponseType::Accept),
            (&i18n.t("no"), ResponseType::Cancel),
        ],
    );
    for response in [ResponseType::Accept, ResponseType::Cancel] {
        if let Some(button) = dialog.widget_for_response(response) {
            button.set_margin_start(8);
            button.set_margin_end(8);
            button.set_margin_top(6);
            button.set_margin_bottom(6);
        }
    }

    let content = dialog.content_area();
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    let label = Label::new(Some(&i18n.t(message_id)));
    label.set_wrap(true);
    content.append(&label);

    dialog.connect_response(move |dialog, response| {
        dialog.close();
        if response == ResponseType::Accept {
            on_confirm();
        }
    });

    dialog.show();
}

/// "Are you sure you want to exit?" from the main menu.
pub fn confirm_exit(parent: &ApplicationWindow, i18n: &I18n, on_confirm: impl Fn() + 'static) {
    confirm(parent, i18n, "exit-title", "exit-message", on_confirm);
}

/// Closing the window while a game is still running.
pub fn confirm_close(parent: &ApplicationWindow, i18n: &I18n, on_confirm: impl Fn() + 'static) {
    confirm(
        parent,
        i18n,
        "close-confirm-title",
        "close-confirm-message",
        on_confirm,
    );
}

/// Wiping the win/draw counters from the settings screen.
pub fn confirm_reset(parent: &ApplicationWindow, i18n: &I18n, on_confirm: impl Fn() + 'static) {
    confirm(parent, i18n, "settings-reset", "reset-message", on_confirm);
}
