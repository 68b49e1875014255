//! Seconds/nanos pairing checks.
//!
//! `Duration` and `Instant` style types store a whole-second count and a
//! nanosecond adjustment. Reading the adjustment without the seconds part
//! almost always means the author expected it to be the full value in
//! nanoseconds. Each check flags a nanos accessor call when no seconds
//! accessor on the same receiver is nearby.

use crate::context::CheckerContext;
use crate::dispatch::{MethodInvocationCheck, diagnostic_at};
use crate::matchers::{Matcher, MethodMatcher, PackageStartsWith, package_starts_with};
use crate::nearby_callers::has_nearby_correlated_call;
use javelin_common::Diagnostic;
use javelin_parser::NodeIndex;
use once_cell::sync::Lazy;
use tracing::trace;

/// A nanos accessor and the seconds accessor it must be paired with.
struct SecondsNanosPair {
    nanos: MethodMatcher,
    seconds: MethodMatcher,
    /// Correlate through accessor chains (`a.getB().getNanos()`)
    check_chains: bool,
    /// Code in these packages implements the type itself
    exempt_package: Option<PackageStartsWith>,
}

impl SecondsNanosPair {
    fn on(class_name: &str, seconds: &str, nanos: &str) -> SecondsNanosPair {
        SecondsNanosPair {
            nanos: MethodMatcher::instance_method()
                .on_exact_class(class_name)
                .named(nanos),
            seconds: MethodMatcher::instance_method()
                .on_exact_class(class_name)
                .named(seconds),
            check_chains: false,
            exempt_package: None,
        }
    }

    fn is_unpaired(&self, ctx: &CheckerContext<'_>, call: NodeIndex) -> bool {
        if !self.nanos.matches(call, ctx) {
            return false;
        }
        if self
            .exempt_package
            .as_ref()
            .is_some_and(|package| package.matches(call, ctx))
        {
            trace!(call = call.0, package = ctx.package_name, "exempt package");
            return false;
        }
        !has_nearby_correlated_call(ctx, call, &self.seconds, self.check_chains)
    }

    fn report(
        &self,
        ctx: &CheckerContext<'_>,
        call: NodeIndex,
        check_name: &str,
        message: &str,
    ) -> Option<Diagnostic> {
        if self.is_unpaired(ctx, call) {
            diagnostic_at(ctx, check_name, call, message)
        } else {
            None
        }
    }
}

static JAVA_DURATION: Lazy<SecondsNanosPair> = Lazy::new(|| SecondsNanosPair {
    exempt_package: Some(package_starts_with("java.time")),
    ..SecondsNanosPair::on("java.time.Duration", "getSeconds", "getNano")
});

static JAVA_INSTANT: Lazy<SecondsNanosPair> = Lazy::new(|| SecondsNanosPair {
    exempt_package: Some(package_starts_with("java.time")),
    ..SecondsNanosPair::on("java.time.Instant", "getEpochSecond", "getNano")
});

static PROTO_DURATION: Lazy<SecondsNanosPair> = Lazy::new(|| SecondsNanosPair {
    check_chains: true,
    ..SecondsNanosPair::on("com.google.protobuf.Duration", "getSeconds", "getNanos")
});

static PROTO_TIMESTAMP: Lazy<SecondsNanosPair> = Lazy::new(|| SecondsNanosPair {
    check_chains: true,
    ..SecondsNanosPair::on("com.google.protobuf.Timestamp", "getSeconds", "getNanos")
});

/// `java.time.Duration#getNano()` without a nearby `getSeconds()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct JavaDurationGetSecondsGetNano;

impl MethodInvocationCheck for JavaDurationGetSecondsGetNano {
    fn name(&self) -> &'static str {
        "JavaDurationGetSecondsGetNano"
    }

    fn match_method_invocation(
        &self,
        ctx: &CheckerContext<'_>,
        call: NodeIndex,
    ) -> Option<Diagnostic> {
        JAVA_DURATION.report(
            ctx,
            call,
            self.name(),
            "duration.getNano() only accesses the underlying nanosecond adjustment from the \
             whole second; pair it with duration.getSeconds() or use duration.toNanos()",
        )
    }
}

/// `java.time.Instant#getNano()` without a nearby `getEpochSecond()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct JavaInstantGetSecondsGetNano;

impl MethodInvocationCheck for JavaInstantGetSecondsGetNano {
    fn name(&self) -> &'static str {
        "JavaInstantGetSecondsGetNano"
    }

    fn match_method_invocation(
        &self,
        ctx: &CheckerContext<'_>,
        call: NodeIndex,
    ) -> Option<Diagnostic> {
        JAVA_INSTANT.report(
            ctx,
            call,
            self.name(),
            "instant.getNano() only accesses the underlying nanosecond adjustment from the \
             whole second; pair it with instant.getEpochSecond()",
        )
    }
}

/// `com.google.protobuf.Duration#getNanos()` without a nearby `getSeconds()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProtoDurationGetSecondsGetNano;

impl MethodInvocationCheck for ProtoDurationGetSecondsGetNano {
    fn name(&self) -> &'static str {
        "ProtoDurationGetSecondsGetNano"
    }

    fn match_method_invocation(
        &self,
        ctx: &CheckerContext<'_>,
        call: NodeIndex,
    ) -> Option<Diagnostic> {
        PROTO_DURATION.report(
            ctx,
            call,
            self.name(),
            "duration.getNanos() only accesses the underlying nanosecond adjustment of the \
             duration; pair it with duration.getSeconds()",
        )
    }
}

/// `com.google.protobuf.Timestamp#getNanos()` without a nearby `getSeconds()`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProtoTimestampGetSecondsGetNano;

impl MethodInvocationCheck for ProtoTimestampGetSecondsGetNano {
    fn name(&self) -> &'static str {
        "ProtoTimestampGetSecondsGetNano"
    }

    fn match_method_invocation(
        &self,
        ctx: &CheckerContext<'_>,
        call: NodeIndex,
    ) -> Option<Diagnostic> {
        PROTO_TIMESTAMP.report(
            ctx,
            call,
            self.name(),
            "timestamp.getNanos() only accesses the underlying nanosecond adjustment of the \
             instant; pair it with timestamp.getSeconds()",
        )
    }
}

/// All seconds/nanos checks.
pub fn time_checks() -> [&'static dyn MethodInvocationCheck; 4] {
    [
        &JavaDurationGetSecondsGetNano,
        &JavaInstantGetSecondsGetNano,
        &ProtoDurationGetSecondsGetNano,
        &ProtoTimestampGetSecondsGetNano,
    ]
}
