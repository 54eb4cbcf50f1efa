//! `bookstore register`, `login`, `logout`.

use anyhow::Result;
use bookstore_client::account;
use bookstore_core::validation::RegistrationForm;

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let form = RegistrationForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };

    account::register(ctx.api.as_ref(), &form).await?;

    ctx.output.success("Registration successful");
    ctx.output
        .info("Sign in to obtain a token, then run `bookstore login --token <TOKEN>`");
    Ok(())
}

pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    account::login(ctx.tokens.as_ref(), &args.token)?;
    ctx.output.success("Signed in");
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    // No cart is mirrored between invocations, so only the token goes.
    account::logout(ctx.tokens.as_ref(), None)?;
    ctx.output.success("Signed out");
    Ok(())
}
