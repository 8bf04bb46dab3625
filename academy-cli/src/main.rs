//! Academy CLI
//!
//! Command-line interface for the academy backend API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use academy_client::AcademyClient;
use academy_types::{PaymentStatus, SignupRequest, signature};

#[derive(Parser)]
#[command(name = "academy")]
#[command(author, version, about = "Academy backend CLI client", long_about = None)]
struct Cli {
    /// Base URL of the academy API
    #[arg(
        long,
        env = "ACADEMY_API_URL",
        default_value = "http://localhost:5000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment order operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Mentor directory operations
    Mentors {
        #[command(subcommand)]
        action: MentorCommands,
    },
    /// Register a student and trigger the welcome SMS
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        student_phone: String,
        #[arg(long)]
        parent_phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Class or course the student enrolls in
        #[arg(long = "class")]
        class_name: Option<String>,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Create a payment order
    Create {
        /// Amount in rupees (e.g. 500 or 99.50)
        #[arg(long)]
        amount: f64,
        /// Custom receipt (defaults to a generated one)
        #[arg(long)]
        receipt: Option<String>,
    },
    /// Verify a checkout result
    Verify {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        payment_id: String,
        #[arg(long)]
        signature: String,
    },
    /// Compute the checkout signature locally (testing aid)
    Sign {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        payment_id: String,
        /// Razorpay key secret
        #[arg(long, env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[derive(Subcommand)]
enum MentorCommands {
    /// List all mentors
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = AcademyClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Order { action } => match action {
            OrderCommands::Create { amount, receipt } => {
                let order = client.create_order(amount, receipt).await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
            }
            OrderCommands::Verify {
                order_id,
                payment_id,
                signature,
            } => match client.verify_payment(&order_id, &payment_id, &signature).await? {
                PaymentStatus::Success => println!("✓ Payment verified"),
                PaymentStatus::Failure => {
                    println!("✗ Payment verification failed");
                    std::process::exit(1);
                }
            },
            OrderCommands::Sign {
                order_id,
                payment_id,
                secret,
            } => {
                println!("{}", signature::sign_payment(&order_id, &payment_id, &secret));
            }
        },

        Commands::Mentors { action } => match action {
            MentorCommands::List => {
                let mentors = client.list_mentors().await?;
                println!("{}", serde_json::to_string_pretty(&mentors)?);
            }
        },

        Commands::Signup {
            name,
            student_phone,
            parent_phone,
            email,
            class_name,
        } => {
            let req = SignupRequest {
                name: Some(name),
                student_phone: Some(student_phone),
                parent_phone,
                email,
                class_name,
            };
            let message = client.signup(&req).await?;
            println!("✓ {}", message);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_create() {
        let cli = Cli::try_parse_from([
            "academy",
            "--api-url",
            "http://api.test",
            "order",
            "create",
            "--amount",
            "99.5",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://api.test");
        match cli.command {
            Commands::Order {
                action: OrderCommands::Create { amount, receipt },
            } => {
                assert_eq!(amount, 99.5);
                assert!(receipt.is_none());
            }
            _ => panic!("expected order create"),
        }
    }

    #[test]
    fn test_parse_signup_class_flag() {
        let cli = Cli::try_parse_from([
            "academy",
            "signup",
            "--name",
            "Asha",
            "--student-phone",
            "9876543210",
            "--class",
            "NEET 2026",
        ])
        .unwrap();

        match cli.command {
            Commands::Signup {
                class_name,
                parent_phone,
                ..
            } => {
                assert_eq!(class_name.as_deref(), Some("NEET 2026"));
                assert!(parent_phone.is_none());
            }
            _ => panic!("expected signup"),
        }
    }

    #[test]
    fn test_parse_order_sign() {
        let result = Cli::try_parse_from([
            "academy",
            "order",
            "sign",
            "--order-id",
            "order_1",
            "--payment-id",
            "pay_1",
            "--secret",
            "s3cr3t",
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
