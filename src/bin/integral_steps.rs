//! Integral Steps - prints antiderivatives with a step-by-step explanation
//!
//! With no expressions on the command line the built-in example list is
//! integrated. A failing example is reported and the batch continues.

use clap::Parser;
use symb_integral::{Integrate, render_rpn, to_rpn, tokenize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXAMPLES: &[&str] = &[
    "2*x",
    "x^2",
    "sin(x)*exp(x)",
    "ln(x)/x",
    "1/(x^2 + 1)",
    "sqrt(x)",
    "root(3, x^2 + 1)",
    "-3*x^3 + 5*x - 1",
    "x*e^x",
    "1/x",
];

#[derive(Parser, Debug)]
#[command(name = "integral-steps")]
#[command(about = "Integrate expressions and explain each step")]
struct Cli {
    /// Expressions to integrate (defaults to the built-in examples)
    expressions: Vec<String>,

    /// Integration variable
    #[arg(long, default_value = "x")]
    var: String,

    /// Print the token list and postfix form of each expression
    #[arg(long)]
    debug: bool,
}

fn print_debug(input: &str) {
    match tokenize(input) {
        Ok(tokens) => {
            let listed: Vec<String> = tokens.iter().map(ToString::to_string).collect();
            println!("Tokens: {}", listed.join(" "));
            match to_rpn(&tokens) {
                Ok(rpn) => println!("RPN: {}", render_rpn(&rpn)),
                Err(e) => println!("RPN: {e}"),
            }
        }
        Err(e) => println!("Tokens: {e}"),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let inputs: Vec<String> = if cli.expressions.is_empty() {
        EXAMPLES.iter().map(|s| (*s).to_owned()).collect()
    } else {
        cli.expressions
    };

    let integrator = Integrate::new()
        .max_depth(symb_integral::DEFAULT_MAX_DEPTH)
        .max_nodes(symb_integral::DEFAULT_MAX_NODES);

    for input in &inputs {
        println!("{}", "=".repeat(60));
        println!("Input: {input}");
        if cli.debug {
            print_debug(input);
        }

        match integrator.integrate_str(input, &cli.var) {
            Ok(result) => {
                println!("Integrand: {}", result.integrand);
                println!("Antiderivative: {} + C", result.antiderivative);
                println!("Steps:");
                for (i, step) in result.steps.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
            }
            Err(e) => println!("Failed to integrate {input}: {e}"),
        }
    }
}
