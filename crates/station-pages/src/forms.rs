//! Selectors for the extension's wallet forms.
//!
//! Styled components carry hashed class names (`TextArea_textarea__2a4Ez`),
//! so class selectors match on the stable prefix only.

/// Seed-phrase recovery form.
#[derive(Debug, Clone, Copy)]
pub struct SeedForm {
    pub name: &'static str,
    pub password: &'static str,
    pub confirm: &'static str,
    pub mnemonic: &'static str,
    pub index: &'static str,
    pub submit: &'static str,
}

pub const SEED_FORM: SeedForm = SeedForm {
    name: r#"[name="name"]"#,
    password: r#"[name="password"]"#,
    confirm: r#"[name="confirm"]"#,
    mnemonic: r#"[name="mnemonic"]"#,
    index: r#"[name="index"]"#,
    submit: r#"[type="submit"]"#,
};

/// New-wallet form, including the mnemonic quiz.
#[derive(Debug, Clone, Copy)]
pub struct CreateWalletForm {
    pub name: &'static str,
    pub password: &'static str,
    pub confirm: &'static str,
    pub mnemonic_text: &'static str,
    pub checkbox: &'static str,
    pub submit: &'static str,
    /// Labels of the quiz questions, such as "3rd word".
    pub quiz_label: &'static str,
}

pub const CREATE_WALLET_FORM: CreateWalletForm = CreateWalletForm {
    name: r#"[name="name"]"#,
    password: r#"[name="password"]"#,
    confirm: r#"[name="confirm"]"#,
    mnemonic_text: r#"[class^="TextArea_textarea"]"#,
    checkbox: r#"[class^="Checkbox_track"]"#,
    submit: r#"[type="submit"]"#,
    quiz_label: r#"[class^="Form_label"]"#,
};

#[derive(Debug, Clone, Copy)]
pub struct PrivateKeyForm {
    pub key: &'static str,
    pub password: &'static str,
}

pub const PRIVATE_KEY_FORM: PrivateKeyForm = PrivateKeyForm {
    key: r#"[name="key"]"#,
    password: r#"[name="password"]"#,
};

#[derive(Debug, Clone, Copy)]
pub struct ChangePasswordForm {
    pub current: &'static str,
    pub password: &'static str,
    pub confirm: &'static str,
}

pub const CHANGE_PASSWORD_FORM: ChangePasswordForm = ChangePasswordForm {
    current: r#"input[name="current"]"#,
    password: r#"input[name="password"]"#,
    confirm: r#"input[name="confirm"]"#,
};

#[derive(Debug, Clone, Copy)]
pub struct MultisigForm {
    pub threshold: &'static str,
    pub name: &'static str,
}

pub const MULTISIG_FORM: MultisigForm = MultisigForm {
    threshold: r#"[name="threshold"]"#,
    name: r#"[name="name"]"#,
};

impl MultisigForm {
    /// Input for the zero-based `index`th signer address.
    pub fn address_input(&self, index: usize) -> String {
        format!(r#"[name="addresses.{}.value"]"#, index)
    }
}

/// Signer inputs a new multisig form starts with.
pub const DEFAULT_MULTISIG_INPUTS: usize = 3;

/// Close control of the manage-wallets modal.
pub const MODAL_CLOSE: &str = r#"[class^="Modal_close"]"#;

/// Amount field of the send forms.
pub const AMOUNT_INPUT: &str = r#"input[name="input"]"#;

pub const PASSWORD_INPUT: &str = r#"input[type="password"]"#;

pub const DONE_ALL_ICON: &str = "DoneAllIcon";
pub const SETTINGS_ICON: &str = "SettingsIcon";
pub const BACK_ICON: &str = "BackIcon";
pub const CONTACTS_ICON: &str = "ContactsIcon";
pub const ADD_ICON: &str = "AddIcon";
pub const REMOVE_ICON: &str = "RemoveIcon";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_input() {
        assert_eq!(MULTISIG_FORM.address_input(0), r#"[name="addresses.0.value"]"#);
        assert_eq!(MULTISIG_FORM.address_input(4), r#"[name="addresses.4.value"]"#);
    }
}
