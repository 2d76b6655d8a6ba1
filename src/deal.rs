use crate::{
    models::{Deal, NewCartItem},
    HoagieError, Result,
};

/// Whether the current wizard step picks a sub or a drink. Sub choices
/// always come first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChoiceKind {
    Sub,
    Drink,
}

/// How a deal enters the cart: deals with no required choices skip the
/// wizard and add directly.
pub enum DealStart {
    AddDirectly(NewCartItem),
    Customize(DealWizard),
}

/// Step sequencer for a deal's required sub/drink selections. One option
/// is recorded per step; after the last step the wizard sits in a summary
/// state until confirmed or cancelled.
#[derive(Debug, Clone)]
pub struct DealWizard {
    deal: Deal,
    selections: Vec<Option<String>>,
    step: u32,
}

/// The selections split into their groups for the confirmation screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DealSummary {
    pub subs: String,
    pub drinks: String,
}

fn describe(selections: &[Option<String>]) -> String {
    let chosen: Vec<&str> = selections
        .iter()
        .filter_map(|s| s.as_deref())
        .collect();
    if chosen.is_empty() {
        "None".to_string()
    } else {
        chosen.join(", ")
    }
}

impl DealWizard {
    /// Entry point for a chosen deal.
    pub fn begin(deal: Deal) -> DealStart {
        if deal.total_choices() == 0 {
            DealStart::AddDirectly(Self::cart_line(&deal))
        } else {
            let total = deal.total_choices() as usize;
            DealStart::Customize(Self {
                deal,
                selections: vec![None; total],
                step: 0,
            })
        }
    }

    fn cart_line(deal: &Deal) -> NewCartItem {
        // The line carries the deal's flat price. The chosen sub/drink
        // options are display-only and do not contribute to it.
        NewCartItem::new(
            deal.name.clone(),
            deal.price,
            deal.image.clone().unwrap_or_default(),
        )
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn current_step(&self) -> u32 {
        self.step
    }

    pub fn total_steps(&self) -> u32 {
        self.deal.total_choices()
    }

    /// True once every choice has been made and the wizard is showing the
    /// summary.
    pub fn is_summary(&self) -> bool {
        self.step >= self.total_steps()
    }

    /// What the current step selects. `None` in the summary state.
    pub fn choice_kind(&self) -> Option<ChoiceKind> {
        if self.is_summary() {
            None
        } else if self.step < self.deal.sub_choices {
            Some(ChoiceKind::Sub)
        } else {
            Some(ChoiceKind::Drink)
        }
    }

    /// The heading for the current step, eg. "Choose your Sub 1".
    pub fn prompt(&self) -> Option<String> {
        self.choice_kind().map(|kind| match kind {
            ChoiceKind::Sub => format!("Choose your Sub {}", self.step + 1),
            ChoiceKind::Drink => {
                format!("Choose your Drink {}", self.step - self.deal.sub_choices + 1)
            }
        })
    }

    /// Records `option` at the current step and advances; the final
    /// selection moves the wizard into the summary state.
    pub fn select(&mut self, option: impl Into<String>) -> Result<()> {
        if self.is_summary() {
            return Err(HoagieError::validation("All choices have been made."));
        }
        self.selections[self.step as usize] = Some(option.into());
        self.step += 1;
        Ok(())
    }

    /// Steps back to the previous choice, including out of the summary
    /// state. Selections already made are preserved.
    pub fn back(&mut self) {
        if self.step > 0 {
            self.step -= 1;
        }
    }

    /// Resets the wizard to its initial state; the caller then discards it.
    pub fn cancel(&mut self) {
        for slot in &mut self.selections {
            *slot = None;
        }
        self.step = 0;
    }

    pub fn summary(&self) -> DealSummary {
        let split = self.deal.sub_choices as usize;
        DealSummary {
            subs: describe(&self.selections[..split.min(self.selections.len())]),
            drinks: describe(&self.selections[split.min(self.selections.len())..]),
        }
    }

    /// Hands back the single synthesized cart line. Only valid from the
    /// summary state with every choice filled in.
    pub fn confirm(&self) -> Result<NewCartItem> {
        if !self.is_summary() || self.selections.iter().any(Option::is_none) {
            return Err(HoagieError::validation(
                "Please complete your selections first.",
            ));
        }
        Ok(Self::cart_line(&self.deal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(sub_choices: u32, drink_choices: u32) -> Deal {
        Deal {
            id: 7,
            name: "Meal Deal".to_string(),
            price: 899.0,
            image: Some("meal.jpg".to_string()),
            sub_choices,
            drink_choices,
        }
    }

    fn wizard(sub_choices: u32, drink_choices: u32) -> DealWizard {
        match DealWizard::begin(deal(sub_choices, drink_choices)) {
            DealStart::Customize(wizard) => wizard,
            DealStart::AddDirectly(_) => panic!("expected a stepped wizard"),
        }
    }

    #[test]
    fn zero_choice_deal_adds_directly() {
        match DealWizard::begin(deal(0, 0)) {
            DealStart::AddDirectly(line) => {
                assert_eq!(line.name, "Meal Deal");
                assert!((line.price - 899.0).abs() < f64::EPSILON);
            }
            DealStart::Customize(_) => panic!("expected a direct add"),
        }
    }

    #[test]
    fn one_sub_one_drink_walks_to_summary() {
        let mut wizard = wizard(1, 1);
        assert_eq!(wizard.choice_kind(), Some(ChoiceKind::Sub));
        assert_eq!(wizard.prompt().as_deref(), Some("Choose your Sub 1"));

        wizard.select("Italian B.M.T.").unwrap();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.choice_kind(), Some(ChoiceKind::Drink));
        assert_eq!(wizard.prompt().as_deref(), Some("Choose your Drink 1"));

        wizard.select("Cola").unwrap();
        assert!(wizard.is_summary());
        assert_eq!(
            wizard.summary(),
            DealSummary {
                subs: "Italian B.M.T.".to_string(),
                drinks: "Cola".to_string(),
            }
        );
    }

    #[test]
    fn back_from_summary_returns_to_drink_step_keeping_the_sub() {
        let mut wizard = wizard(1, 1);
        wizard.select("Italian B.M.T.").unwrap();
        wizard.select("Cola").unwrap();
        assert!(wizard.is_summary());

        wizard.back();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.choice_kind(), Some(ChoiceKind::Drink));
        assert_eq!(wizard.summary().subs, "Italian B.M.T.");

        // Re-selecting the drink lands back on the summary
        wizard.select("Lemonade").unwrap();
        assert!(wizard.is_summary());
        assert_eq!(wizard.summary().drinks, "Lemonade");
    }

    #[test]
    fn confirm_uses_the_flat_deal_price() {
        let mut wizard = wizard(2, 1);
        wizard.select("Tuna").unwrap();
        wizard.select("Veggie Delite").unwrap();
        wizard.select("Iced Tea").unwrap();

        let line = wizard.confirm().unwrap();
        assert_eq!(line.name, "Meal Deal");
        assert!((line.price - 899.0).abs() < f64::EPSILON);
        assert_eq!(line.image, "meal.jpg");
    }

    #[test]
    fn confirm_before_summary_is_a_validation_error() {
        let mut wizard = wizard(1, 1);
        wizard.select("Tuna").unwrap();
        assert!(matches!(
            wizard.confirm(),
            Err(HoagieError::Validation(_))
        ));
    }

    #[test]
    fn cancel_resets_selections_and_step() {
        let mut wizard = wizard(1, 1);
        wizard.select("Tuna").unwrap();
        wizard.cancel();
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.summary().subs, "None");
        assert_eq!(wizard.summary().drinks, "None");
    }

    #[test]
    fn back_at_step_zero_is_a_no_op() {
        let mut wizard = wizard(1, 1);
        wizard.back();
        assert_eq!(wizard.current_step(), 0);
    }
}
