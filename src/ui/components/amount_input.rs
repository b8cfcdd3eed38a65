use crate::model::currency::CryptoCurrency;
use egui::{ComboBox, InnerResponse, Response, TextEdit, Ui, WidgetText};

/// Currency selector followed by a free-text amount field.
///
/// The widget only edits the raw text and the selected currency; parsing and
/// validation are left to the caller so that errors can be reported in the
/// caller's wording.
///
/// # Example
/// ```rust
/// use zone_wallet_tool::model::currency::CryptoCurrency;
/// use zone_wallet_tool::ui::components::amount_input::AmountInput;
/// # fn example(ui: &mut egui::Ui) {
/// let mut currency = CryptoCurrency::Usdt;
/// let mut amount = String::new();
/// let response = AmountInput::new(&mut currency, &mut amount)
///     .hint_text("0.00")
///     .show(ui);
///
/// if response.inner.amount_changed {
///     println!("Amount changed: {}", amount);
/// }
/// # }
/// ```
pub struct AmountInput<'a> {
    currency: &'a mut CryptoCurrency,
    amount: &'a mut String,
    hint_text: Option<WidgetText>,
    desired_width: Option<f32>,
}

/// Response from the amount input widget
pub struct AmountInputResponse {
    /// The response from the text edit widget
    pub response: Response,
    /// Whether the amount text has changed
    pub amount_changed: bool,
    /// Whether another currency was selected
    pub currency_changed: bool,
}

impl<'a> AmountInput<'a> {
    pub fn new(currency: &'a mut CryptoCurrency, amount: &'a mut String) -> Self {
        Self {
            currency,
            amount,
            hint_text: None,
            desired_width: None,
        }
    }

    /// Sets the hint text for the input field.
    pub fn hint_text<T: Into<WidgetText>>(mut self, hint_text: T) -> Self {
        self.hint_text = Some(hint_text.into());
        self
    }

    /// Sets the desired width of the input field.
    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    /// Renders the amount input widget and returns an `InnerResponse` for use with `show()`.
    pub fn show(self, ui: &mut Ui) -> InnerResponse<AmountInputResponse> {
        ui.horizontal(|ui| {
            let mut currency_changed = false;
            ComboBox::from_id_salt("withdrawal_source_currency")
                .selected_text(self.currency.symbol())
                .width(80.0)
                .show_ui(ui, |ui| {
                    for currency in enum_iterator::all::<CryptoCurrency>() {
                        currency_changed |= ui
                            .selectable_value(&mut *self.currency, currency, currency.symbol())
                            .changed();
                    }
                });

            let mut text_edit = TextEdit::singleline(self.amount);
            if let Some(hint) = self.hint_text {
                text_edit = text_edit.hint_text(hint);
            }
            if let Some(width) = self.desired_width {
                text_edit = text_edit.desired_width(width);
            }

            let response = ui.add(text_edit);
            let amount_changed = response.changed();

            AmountInputResponse {
                response,
                amount_changed,
                currency_changed,
            }
        })
    }
}
