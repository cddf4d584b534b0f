//! FD-GAN 训练器
//!
//! 每一步先更新判别器，再更新生成器：
//! 1. 判别器对真实的 source 打分（空间域 + 频域），标签为真；
//! 2. 生成器由噪声、source、reference 合成 fake，判别器对 detach 后的 fake 打分，标签为假；
//! 3. 判别器损失 = 真损失 + 假损失，反向传播后更新判别器；
//! 4. 判别器对未 detach 的同一个 fake 重新打分，标签为真，得到生成器损失并更新生成器。
//! 一步结束后释放本步创建的所有临时节点，计算图中只保留参数。

use std::path::Path;

use crate::data::PairedBatches;
use crate::nn::{Adam, Graph, Optimizer, Var};
use crate::tensor::Tensor;

use super::config::TrainerConfig;
use super::device::Device;
use super::discriminator::Discriminator;
use super::error::FdGanError;
use super::generators::{BlendGenerator, TransferGenerator};
use super::losses::GanLoss;
use super::traits::{AdversarialLoss, ImageBlender, ImageCritic, ImageTransfer};

/// 单步的损失记录
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLosses {
    pub epoch: usize,
    pub step: usize,
    pub dis_loss: f32,
    pub gen_loss: f32,
}

/// `train`的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainReport {
    /// 执行的`train_step`次数
    pub steps: usize,
    pub history: Vec<StepLosses>,
}

impl TrainReport {
    pub fn last(&self) -> Option<&StepLosses> {
        self.history.last()
    }
}

/// 第`step`步（从 0 计）是否打印进度
pub(crate) const fn should_log(step: usize, log_every: usize) -> bool {
    step % log_every == 0
}

/// 进度行，epoch 与 step 以 1 起计显示
pub(crate) fn progress_line(
    epoch: usize,
    num_epochs: usize,
    step: usize,
    num_batches: usize,
    dis_loss: f32,
    gen_loss: f32,
) -> String {
    format!(
        "Epoch [{}/{}], Step [{}/{}], Dis Loss: {dis_loss:.4}, Gen Loss: {gen_loss:.4}",
        epoch + 1,
        num_epochs,
        step + 1,
        num_batches,
    )
}

pub struct FdGanTrainer<B = BlendGenerator, T = TransferGenerator, D = Discriminator> {
    graph: Graph,
    device: Device,
    config: TrainerConfig,
    blend_generator: B,
    transfer_generator: T,
    discriminator: D,
    adv_loss: Box<dyn AdversarialLoss>,
    gen_optimizer: Adam,
    dis_optimizer: Adam,
}

impl FdGanTrainer {
    /// 按配置创建默认网络结构的训练器
    pub fn new(config: TrainerConfig) -> Result<Self, FdGanError> {
        config.validate()?;
        let graph = Graph::new_with_seed(config.seed);
        let blend = BlendGenerator::new(&graph, config.channels, config.generator_width, "blend")?;
        let transfer =
            TransferGenerator::new(&graph, config.channels, config.generator_width, "transfer")?;
        let discriminator =
            Discriminator::new(&graph, config.channels, config.discriminator_width, "dis")?;
        Self::with_models(graph, config, blend, transfer, discriminator)
    }
}

impl<B, T, D> FdGanTrainer<B, T, D>
where
    B: ImageBlender,
    T: ImageTransfer,
    D: ImageCritic,
{
    /// 使用自定义网络创建训练器，网络参数必须都建在`graph`上
    pub fn with_models(
        graph: Graph,
        config: TrainerConfig,
        blend_generator: B,
        transfer_generator: T,
        discriminator: D,
    ) -> Result<Self, FdGanError> {
        config.validate()?;
        let device = Device::from_request(&config.device)?;

        let mut gen_params = blend_generator.parameters();
        gen_params.extend(transfer_generator.parameters());
        let dis_params = discriminator.parameters();
        let adam = |params: &[Var]| {
            Adam::with_config(
                &graph,
                params,
                config.learning_rate,
                config.beta1,
                config.beta2,
                config.epsilon,
            )
        };
        let gen_optimizer = adam(&gen_params);
        let dis_optimizer = adam(&dis_params);

        tracing::info!(
            %device,
            seed = config.seed,
            gan_mode = ?config.gan_mode,
            gen_params = gen_params.len(),
            dis_params = dis_params.len(),
            "FD-GAN 训练器已创建"
        );

        Ok(Self {
            adv_loss: Box::new(GanLoss::new(config.gan_mode)),
            graph,
            device,
            config,
            blend_generator,
            transfer_generator,
            discriminator,
            gen_optimizer,
            dis_optimizer,
        })
    }

    /// 替换对抗损失
    pub fn set_adversarial_loss(&mut self, loss: Box<dyn AdversarialLoss>) {
        self.adv_loss = loss;
    }

    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    pub const fn device(&self) -> Device {
        self.device
    }

    pub const fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub const fn blend_generator(&self) -> &B {
        &self.blend_generator
    }

    pub const fn transfer_generator(&self) -> &T {
        &self.transfer_generator
    }

    pub const fn discriminator(&self) -> &D {
        &self.discriminator
    }

    /// 两个生成器的参数（由生成器优化器更新）
    pub fn generator_parameters(&self) -> Vec<Var> {
        let mut params = self.blend_generator.parameters();
        params.extend(self.transfer_generator.parameters());
        params
    }

    /// 对(空间域, 频域)两个输出计算同一标签的损失并求和
    fn critic_loss(&self, image: &Var, is_real: bool) -> Result<Var, FdGanError> {
        let (spatial, frequency) = self.discriminator.critique(image)?;
        let spatial_loss = self.adv_loss.forward(&spatial, is_real)?;
        let frequency_loss = self.adv_loss.forward(&frequency, is_real)?;
        Ok(spatial_loss.try_add(&frequency_loss)?)
    }

    /// 判别器阶段：更新判别器，返回判别器损失与（未 detach 的）fake 图像
    pub fn discriminator_step(
        &mut self,
        source: &Tensor,
        reference: &Tensor,
    ) -> Result<(f32, Var), FdGanError> {
        let source = self.graph.input_named(&self.device.place(source)?, "source")?;
        let reference = self
            .graph
            .input_named(&self.device.place(reference)?, "reference")?;

        self.dis_optimizer.zero_grad()?;
        let real_loss = self.critic_loss(&source, true)?;

        let noise = self.graph.randn(&source.shape()?)?;
        let (fake, _mask) = self.blend_generator.blend(&noise, &source, &reference)?;
        let fake_loss = self.critic_loss(&fake.detach()?, false)?;

        let dis_loss = real_loss.try_add(&fake_loss)?.backward()?;
        self.dis_optimizer.step()?;
        Ok((dis_loss, fake))
    }

    /// 生成器阶段：判别器对同一个 fake 重新打分，标签为真，更新生成器
    pub fn generator_step(&mut self, fake: &Var) -> Result<f32, FdGanError> {
        self.gen_optimizer.zero_grad()?;
        let gen_loss = self.critic_loss(fake, true)?.backward()?;
        self.gen_optimizer.step()?;
        Ok(gen_loss)
    }

    /// 一次完整的训练步，返回`(判别器损失, 生成器损失)`
    pub fn train_step(
        &mut self,
        source: &Tensor,
        reference: &Tensor,
    ) -> Result<(f32, f32), FdGanError> {
        let result = self
            .discriminator_step(source, reference)
            .and_then(|(dis_loss, fake)| Ok((dis_loss, self.generator_step(&fake)?)));

        // 两个优化器在各自的反向传播之前都会清零梯度，这里统一清理残留梯度与临时节点
        self.graph.zero_grad();
        let released = self.graph.release_transient_nodes();

        let (dis_loss, gen_loss) = result?;
        tracing::debug!(dis_loss, gen_loss, released, "train_step 完成");
        Ok((dis_loss, gen_loss))
    }

    /// 训练`num_epochs`个 epoch，每`log_every`步打印一次进度
    pub fn train<L: PairedBatches + ?Sized>(
        &mut self,
        loader: &L,
        num_epochs: usize,
    ) -> Result<TrainReport, FdGanError> {
        let num_batches = loader.num_batches();
        let mut report = TrainReport::default();

        for epoch in 0..num_epochs {
            for (step, (source, reference)) in loader.batches().enumerate() {
                let (dis_loss, gen_loss) = self.train_step(&source, &reference)?;
                report.steps += 1;
                report.history.push(StepLosses {
                    epoch,
                    step,
                    dis_loss,
                    gen_loss,
                });
                if should_log(step, self.config.log_every) {
                    println!(
                        "{}",
                        progress_line(epoch, num_epochs, step, num_batches, dis_loss, gen_loss)
                    );
                }
            }
            if let Some(last) = report.last() {
                tracing::info!(
                    epoch = epoch + 1,
                    num_epochs,
                    dis_loss = last.dis_loss,
                    gen_loss = last.gen_loss,
                    "epoch 结束"
                );
            }
        }
        Ok(report)
    }

    /// 推理：不记录梯度地合成一批图像
    pub fn generate(&self, source: &Tensor, reference: &Tensor) -> Result<Tensor, FdGanError> {
        let result = self.graph.no_grad_scope(|| -> Result<Tensor, FdGanError> {
            let source = self.graph.input(&self.device.place(source)?)?;
            let reference = self.graph.input(&self.device.place(reference)?)?;
            let noise = self.graph.randn(&source.shape()?)?;
            let (fake, _mask) = self.blend_generator.blend(&noise, &source, &reference)?;
            Ok(fake.tensor()?)
        });
        self.graph.release_transient_nodes();
        result
    }

    /// 保存两个生成器的参数
    pub fn save_generators<P: AsRef<Path>>(&self, path: P) -> Result<(), FdGanError> {
        self.graph.save_params_of(path, &self.generator_parameters())?;
        Ok(())
    }

    /// 保存全部参数（生成器与判别器）
    pub fn save_params<P: AsRef<Path>>(&self, path: P) -> Result<(), FdGanError> {
        self.graph.save_params(path)?;
        Ok(())
    }

    /// 加载参数文件（按参数名匹配），返回加载的参数个数
    pub fn load_params<P: AsRef<Path>>(&self, path: P) -> Result<usize, FdGanError> {
        let loaded = self.graph.load_params(path)?;
        tracing::info!(loaded, "已加载参数");
        Ok(loaded)
    }
}
