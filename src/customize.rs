use crate::{
    models::{MenuItem, NewCartItem},
    HoagieError, Result,
};

const CUSTOM_SANDWICH_NAME: &str = "Customized Sandwich";
const CUSTOM_SANDWICH_IMAGE: &str = "assets/sub.jpg";

/// Build-your-own sandwich: exactly one bread, exactly one meat, any
/// number of toppings. Picking an already-picked option again deselects
/// it. The price is the sum of everything chosen.
#[derive(Debug, Default, Clone)]
pub struct SandwichCustomizer {
    bread: Option<MenuItem>,
    meat: Option<MenuItem>,
    toppings: Vec<MenuItem>,
}

impl SandwichCustomizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose_bread(&mut self, bread: MenuItem) {
        if self.bread.as_ref().map(|b| b.id) == Some(bread.id) {
            self.bread = None;
        } else {
            self.bread = Some(bread);
        }
    }

    pub fn choose_meat(&mut self, meat: MenuItem) {
        if self.meat.as_ref().map(|m| m.id) == Some(meat.id) {
            self.meat = None;
        } else {
            self.meat = Some(meat);
        }
    }

    pub fn toggle_topping(&mut self, topping: MenuItem) {
        if let Some(pos) = self.toppings.iter().position(|t| t.id == topping.id) {
            self.toppings.remove(pos);
        } else {
            self.toppings.push(topping);
        }
    }

    pub fn bread(&self) -> Option<&MenuItem> {
        self.bread.as_ref()
    }

    pub fn meat(&self) -> Option<&MenuItem> {
        self.meat.as_ref()
    }

    pub fn toppings(&self) -> &[MenuItem] {
        &self.toppings
    }

    pub fn total(&self) -> f64 {
        let bread = self.bread.as_ref().map(|b| b.price).unwrap_or(0.0);
        let meat = self.meat.as_ref().map(|m| m.price).unwrap_or(0.0);
        let toppings: f64 = self.toppings.iter().map(|t| t.price).sum();
        bread + meat + toppings
    }

    /// The cart line for the assembled sandwich. Both bread and meat are
    /// required; toppings are optional.
    pub fn build(&self) -> Result<NewCartItem> {
        if self.bread.is_none() || self.meat.is_none() {
            return Err(HoagieError::validation(
                "Please select both bread and meat.",
            ));
        }
        Ok(NewCartItem::new(
            CUSTOM_SANDWICH_NAME,
            self.total(),
            CUSTOM_SANDWICH_IMAGE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            price,
            image: None,
        }
    }

    #[test]
    fn total_sums_bread_meat_and_toppings() {
        let mut customizer = SandwichCustomizer::new();
        customizer.choose_bread(item(1, "Italian Herbs", 100.0));
        customizer.choose_meat(item(2, "Chicken", 250.0));
        customizer.toggle_topping(item(3, "Olives", 30.0));
        customizer.toggle_topping(item(4, "Jalapenos", 40.0));
        assert!((customizer.total() - 420.0).abs() < 0.0005);
    }

    #[test]
    fn picking_the_same_option_again_deselects_it() {
        let mut customizer = SandwichCustomizer::new();
        customizer.choose_bread(item(1, "Wheat", 90.0));
        customizer.choose_bread(item(1, "Wheat", 90.0));
        assert!(customizer.bread().is_none());

        customizer.toggle_topping(item(3, "Olives", 30.0));
        customizer.toggle_topping(item(3, "Olives", 30.0));
        assert!(customizer.toppings().is_empty());
    }

    #[test]
    fn build_requires_bread_and_meat() {
        let mut customizer = SandwichCustomizer::new();
        customizer.choose_bread(item(1, "Wheat", 90.0));
        assert!(matches!(
            customizer.build(),
            Err(HoagieError::Validation(_))
        ));

        customizer.choose_meat(item(2, "Turkey", 220.0));
        let line = customizer.build().unwrap();
        assert_eq!(line.name, "Customized Sandwich");
        assert!((line.price - 310.0).abs() < 0.0005);
    }
}
