//! The `setup` operation

use crate::context::RunState;
use crate::permissions::adjust_directory_permissions;
use crate::security::{disable_security_enhancements, verify_setup_allowed};
use crate::views::extract_views;
use crate::{load_properties, OpsCtx, SetupReport};
use hostsetup_config::{keys, Properties};
use hostsetup_database::{cache_jdbc_driver, check_jdbc_drivers, DatabaseContext};
use hostsetup_errors::{Error, SetupError};
use hostsetup_events::{AppEvent, EventEmitter, RuntimeEvent};
use hostsetup_platform::{firewall, os, privileges};
use hostsetup_runtime::{unpack_policy_bundle, RuntimeAcquisition};
use hostsetup_types::{DatabaseKind, SetupOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// Bring the host to a configured state.
///
/// Steps run in a fixed order and each one is skipped when its result is
/// already recorded, so a second run converges on the same properties.
///
/// # Errors
///
/// Returns the first fatal step error, annotated with the step that failed.
/// A non-root caller gets `NotPrivileged` (exit status 4).
pub async fn setup(ctx: &OpsCtx, mut options: SetupOptions) -> Result<SetupReport, Error> {
    ctx.step("Checking administrative privileges", ensure_root(ctx, "setup"))
        .await?;

    let mut props = ctx
        .step("Reading server properties", load_properties(ctx))
        .await?;
    let mut report = SetupReport::default();

    ctx.step("Verifying setup prerequisites", async {
        verify_setup_allowed(ctx, &props)
    })
    .await?;

    ctx.step(
        "Relaxing security enhancements",
        disable_security_enhancements(ctx),
    )
    .await?;

    let user = ctx
        .step("Provisioning server user", provision_user(ctx, &mut props))
        .await?;
    report.server_user = Some(user.clone());

    ctx.step("Checking firewall", check_firewall(ctx)).await?;

    if let (Some(driver), Some(db)) = (
        options.jdbc_driver.as_deref(),
        options.jdbc_db.as_deref(),
    ) {
        report.jdbc_driver = ctx
            .step(
                "Registering JDBC driver",
                cache_jdbc_driver(ctx.family, &props, driver, db),
            )
            .await?;
        report.driver_only = true;
        return Ok(report);
    }

    let state = ctx
        .step(
            "Checking JDK",
            acquire_runtime(ctx, &mut props, &options, &mut report),
        )
        .await?;

    if state.custom_runtime {
        ctx.emit_step_skipped("Installing JCE policy", "custom JDK");
    } else if props.contains_key(keys::JCE_NAME) {
        ctx.step("Installing JCE policy", install_policy(ctx, &props))
            .await?;
    } else {
        ctx.emit_step_skipped("Installing JCE policy", "policy archive was not downloaded");
    }

    let os_type = ctx
        .step("Completing setup", record_os(ctx, &mut props))
        .await?;
    report.os_type = Some(os_type);

    let kind = ctx
        .step(
            "Configuring database",
            configure_database(ctx, &mut props, &mut options),
        )
        .await?;
    report.database = Some(kind.to_string());

    ctx.step("Checking JDBC drivers", async {
        check_jdbc_drivers(ctx.family, kind, &props)
    })
    .await?;

    report.views = ctx
        .step("Extracting system views", extract_views(ctx, &props))
        .await?;

    ctx.step("Adjusting directory permissions", async {
        adjust_directory_permissions(ctx, &props, &user).await;
        Ok(())
    })
    .await?;

    Ok(report)
}

pub(crate) async fn ensure_root(ctx: &OpsCtx, command: &str) -> Result<(), Error> {
    if privileges::is_root(ctx.family, ctx.ops.as_ref()).await? {
        Ok(())
    } else {
        Err(SetupError::NotPrivileged {
            command: command.to_string(),
        }
        .into())
    }
}

async fn provision_user(ctx: &OpsCtx, props: &mut Properties) -> Result<String, Error> {
    let existing = props.get(keys::SERVER_USER).map(str::to_owned);
    let resolution = ctx
        .policy
        .create_privileged_user(existing.as_deref(), ctx.prompter.as_ref())
        .await?;

    if resolution.created || existing.as_deref() != Some(resolution.user.as_str()) {
        props.set(keys::SERVER_USER, resolution.user.clone());
        props.persist().await?;
    }

    adjust_directory_permissions(ctx, props, &resolution.user).await;
    Ok(resolution.user)
}

async fn check_firewall(ctx: &OpsCtx) -> Result<(), Error> {
    let Some(name) = firewall::active_firewall(ctx.family, ctx.ops.as_ref()).await? else {
        return Ok(());
    };

    ctx.emit_warning(format!(
        "{name} is running. Confirm the necessary server ports are accessible. \
         Refer to the documentation for more details on ports."
    ));
    if ctx.prompter.confirm("OK to continue", true).await? {
        Ok(())
    } else {
        Err(SetupError::Cancelled {
            operation: "setup".to_string(),
        }
        .into())
    }
}

async fn acquire_runtime(
    ctx: &OpsCtx,
    props: &mut Properties,
    options: &SetupOptions,
    report: &mut SetupReport,
) -> Result<RunState, Error> {
    let acquisition = RuntimeAcquisition {
        family: ctx.family,
        home_var: &ctx.config.runtime.home_var,
        prompter: ctx.prompter.as_ref(),
        downloader: ctx.downloader.as_ref(),
        installer: ctx.installer.as_ref(),
        policy: ctx.policy.as_ref(),
        tx: Some(ctx.tx.clone()),
    };
    let acquired = acquisition
        .acquire(props, options.java_home.as_deref())
        .await?;

    report.java_home = Some(acquired.java_home);
    report.custom_runtime = acquired.custom;
    Ok(RunState {
        custom_runtime: acquired.custom,
    })
}

pub(crate) async fn install_policy(ctx: &OpsCtx, props: &Properties) -> Result<PathBuf, Error> {
    let security_dir = unpack_policy_bundle(props).await?;
    ctx.emit(AppEvent::Runtime(RuntimeEvent::PolicyInstalled {
        security_dir: security_dir.clone(),
    }));
    Ok(security_dir)
}

/// Record the OS fingerprint unless an earlier run already did.
async fn record_os(ctx: &OpsCtx, props: &mut Properties) -> Result<String, Error> {
    if let Some(recorded) = props
        .get(keys::OS_TYPE)
        .filter(|recorded| !recorded.trim().is_empty())
    {
        ctx.emit_debug(format!("OS type already recorded as {recorded}"));
        return Ok(recorded.to_string());
    }

    let info = match &ctx.os_info {
        Some(info) => info.clone(),
        None => os::detect(ctx.family, ctx.ops.as_ref()).await?,
    };
    let os_type = info.type_fingerprint();

    props.set(keys::OS_FAMILY, info.family_fingerprint());
    props.set(keys::OS_TYPE, os_type.clone());
    props.persist().await?;
    Ok(os_type)
}

async fn configure_database(
    ctx: &OpsCtx,
    props: &mut Properties,
    options: &mut SetupOptions,
) -> Result<DatabaseKind, Error> {
    let db = DatabaseContext {
        family: ctx.family,
        ops: Arc::clone(&ctx.ops),
        prompter: ctx.prompter.as_ref(),
        tx: Some(ctx.tx.clone()),
    };

    db.prompt_database(options).await?;
    let strategy = db.configure(options, props).await?;
    props.persist().await?;
    strategy.setup().await?;
    Ok(strategy.kind())
}
