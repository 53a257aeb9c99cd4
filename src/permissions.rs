//! Permission and billing checks for image generation.

use crate::models::{Billing, GenerateImageRequest, PromptPart, User};
use crate::{Error, Result};

/// Decide whether this user may run the request, and what it costs.
///
/// Admins always pass; everyone else needs a positive credit balance.
pub fn check_image_permissions(user: &User, request: &GenerateImageRequest) -> Result<Billing> {
    if !user.admin && user.credits <= 0 {
        return Err(Error::Forbidden(
            "Insufficient credits for image generation".to_string(),
        ));
    }

    Ok(billing_for(request))
}

/// Input units follow the prompt text length; output is one unit per
/// generated image.
fn billing_for(request: &GenerateImageRequest) -> Billing {
    let input_units = request
        .prompt
        .iter()
        .map(|part| match part {
            PromptPart::Text { text } => text.chars().count() as i64,
            PromptPart::Image { .. } => 0,
        })
        .sum();

    Billing {
        input_units,
        output_units: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(texts: &[&str]) -> GenerateImageRequest {
        GenerateImageRequest {
            prompt: texts
                .iter()
                .map(|t| PromptPart::Text {
                    text: t.to_string(),
                })
                .collect(),
            model: "some/model".to_string(),
        }
    }

    fn user(admin: bool, credits: i64) -> User {
        User {
            email: "a@b.c".to_string(),
            admin,
            credits,
            created_at: None,
        }
    }

    #[test]
    fn test_admin_passes_without_credits() {
        let billing = check_image_permissions(&user(true, 0), &request(&["fox"])).unwrap();
        assert_eq!(billing.input_units, 3);
        assert_eq!(billing.output_units, 1);
    }

    #[test]
    fn test_user_without_credits_is_forbidden() {
        let err = check_image_permissions(&user(false, 0), &request(&["fox"])).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn test_input_units_sum_text_parts_only() {
        let mut req = request(&["abc", "de"]);
        req.prompt.push(PromptPart::Image {
            content: "/x.png".to_string(),
        });

        let billing = check_image_permissions(&user(false, 10), &req).unwrap();
        assert_eq!(billing.input_units, 5);
    }
}
